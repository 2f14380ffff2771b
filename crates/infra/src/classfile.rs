// crates/infra/src/classfile.rs
//! Minimal JVM class-file header reader.
//!
//! Only what suite detection needs is decoded: access flags, the class
//! itself, its superclass and its interfaces. Fields, methods and attributes
//! are never touched.

use thiserror::Error;

const MAGIC: u32 = 0xCAFE_BABE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassFileError {
    #[error("not a class file (magic {0:#010x})")]
    BadMagic(u32),

    #[error("truncated at byte {0}")]
    Truncated(usize),

    #[error("unknown constant pool tag {tag} at entry {index}")]
    UnknownTag { tag: u8, index: u16 },

    #[error("constant pool entry {0} is not the expected kind")]
    BadReference(u16),
}

/// Access flags of a class as stored in the class file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessFlags(pub u16);

impl AccessFlags {
    pub const PUBLIC: u16 = 0x0001;
    pub const FINAL: u16 = 0x0010;
    pub const SUPER: u16 = 0x0020;
    pub const INTERFACE: u16 = 0x0200;
    pub const ABSTRACT: u16 = 0x0400;
    pub const SYNTHETIC: u16 = 0x1000;
    pub const ANNOTATION: u16 = 0x2000;
    pub const ENUM: u16 = 0x4000;
    pub const MODULE: u16 = 0x8000;

    pub const fn contains(self, flag: u16) -> bool {
        self.0 & flag == flag
    }

    /// Public class that can be instantiated.
    pub const fn is_concrete(self) -> bool {
        let not_instantiable =
            Self::INTERFACE | Self::ABSTRACT | Self::SYNTHETIC | Self::ANNOTATION | Self::ENUM | Self::MODULE;
        self.contains(Self::PUBLIC) && self.0 & not_instantiable == 0
    }
}

/// Decoded class-file header. Names are in internal form (`com/example/Foo`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader {
    pub access: AccessFlags,
    pub this_class: String,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
}

impl ClassHeader {
    pub fn parse(bytes: &[u8]) -> Result<Self, ClassFileError> {
        let mut reader = Reader { bytes, pos: 0 };
        let magic = reader.u32()?;
        if magic != MAGIC {
            return Err(ClassFileError::BadMagic(magic));
        }
        reader.skip(4)?; // minor, major

        let pool = ConstantPool::read(&mut reader)?;
        let access = AccessFlags(reader.u16()?);
        let this_class = pool.class_name(reader.u16()?)?.to_string();
        let super_index = reader.u16()?;
        let super_class = if super_index == 0 { None } else { Some(pool.class_name(super_index)?.to_string()) };
        let count = reader.u16()?;
        let interfaces = (0..count)
            .map(|_| reader.u16().and_then(|index| pool.class_name(index).map(str::to_string)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { access, this_class, super_class, interfaces })
    }

    /// Direct supertypes, superclass first.
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.super_class.as_deref().into_iter().chain(self.interfaces.iter().map(String::as_str))
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take(&mut self, len: usize) -> Result<&[u8], ClassFileError> {
        let end = self.pos.checked_add(len).filter(|end| *end <= self.bytes.len());
        let Some(end) = end else {
            return Err(ClassFileError::Truncated(self.bytes.len()));
        };
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<(), ClassFileError> {
        self.take(len).map(|_| ())
    }

    fn u8(&mut self) -> Result<u8, ClassFileError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ClassFileError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ClassFileError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

enum Constant {
    Utf8(String),
    Class(u16),
    Other,
}

struct ConstantPool(Vec<Constant>);

impl ConstantPool {
    fn read(reader: &mut Reader<'_>) -> Result<Self, ClassFileError> {
        let count = reader.u16()?;
        // Slot 0 is unused; long and double take two slots.
        let mut entries = Vec::with_capacity(usize::from(count));
        entries.push(Constant::Other);
        let mut index = 1u16;
        while index < count {
            let tag = reader.u8()?;
            let (constant, slots) = match tag {
                1 => {
                    let len = usize::from(reader.u16()?);
                    (Constant::Utf8(String::from_utf8_lossy(reader.take(len)?).into_owned()), 1)
                }
                7 => (Constant::Class(reader.u16()?), 1),
                3 | 4 => (reader.skip(4).map(|()| Constant::Other)?, 1),
                5 | 6 => (reader.skip(8).map(|()| Constant::Other)?, 2),
                8 | 16 | 19 | 20 => (reader.skip(2).map(|()| Constant::Other)?, 1),
                9 | 10 | 11 | 12 | 17 | 18 => (reader.skip(4).map(|()| Constant::Other)?, 1),
                15 => (reader.skip(3).map(|()| Constant::Other)?, 1),
                _ => return Err(ClassFileError::UnknownTag { tag, index }),
            };
            entries.push(constant);
            if slots == 2 {
                entries.push(Constant::Other);
            }
            index = index.saturating_add(slots);
        }
        Ok(Self(entries))
    }

    fn utf8(&self, index: u16) -> Result<&str, ClassFileError> {
        match self.0.get(usize::from(index)) {
            Some(Constant::Utf8(value)) => Ok(value),
            _ => Err(ClassFileError::BadReference(index)),
        }
    }

    fn class_name(&self, index: u16) -> Result<&str, ClassFileError> {
        match self.0.get(usize::from(index)) {
            Some(Constant::Class(name_index)) => self.utf8(*name_index),
            _ => Err(ClassFileError::BadReference(index)),
        }
    }
}

/// Builds minimal class files for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod fixture {
    use super::AccessFlags;

    pub const PUBLIC_CLASS: u16 = AccessFlags::PUBLIC | AccessFlags::SUPER;
    pub const PUBLIC_ABSTRACT_CLASS: u16 = PUBLIC_CLASS | AccessFlags::ABSTRACT;
    pub const PUBLIC_INTERFACE: u16 = AccessFlags::PUBLIC | AccessFlags::INTERFACE | AccessFlags::ABSTRACT;

    struct Pool {
        bytes: Vec<u8>,
        next: u16,
    }

    impl Pool {
        fn long(&mut self, value: u64) {
            self.bytes.push(5);
            self.bytes.extend_from_slice(&value.to_be_bytes());
            self.next += 2;
        }

        fn class(&mut self, name: &str) -> u16 {
            let utf8_index = self.next;
            self.bytes.push(1);
            self.bytes.extend_from_slice(&(name.len() as u16).to_be_bytes());
            self.bytes.extend_from_slice(name.as_bytes());
            self.bytes.push(7);
            self.bytes.extend_from_slice(&utf8_index.to_be_bytes());
            self.next += 2;
            utf8_index + 1
        }
    }

    /// Bytes of a class file declaring `this_class` with the given supertypes.
    /// Names use internal form (`com/example/Foo`).
    pub fn class_bytes(access: u16, this_class: &str, super_class: Option<&str>, interfaces: &[&str]) -> Vec<u8> {
        let mut pool = Pool { bytes: Vec::new(), next: 1 };
        // A long constant first exercises the two-slot rule.
        pool.long(42);
        let this_index = pool.class(this_class);
        let super_index = super_class.map_or(0, |name| pool.class(name));
        let interface_indices: Vec<u16> = interfaces.iter().map(|name| pool.class(name)).collect();

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes());
        bytes.extend_from_slice(&52u16.to_be_bytes());
        bytes.extend_from_slice(&pool.next.to_be_bytes());
        bytes.extend_from_slice(&pool.bytes);
        bytes.extend_from_slice(&access.to_be_bytes());
        bytes.extend_from_slice(&this_index.to_be_bytes());
        bytes.extend_from_slice(&super_index.to_be_bytes());
        bytes.extend_from_slice(&(interface_indices.len() as u16).to_be_bytes());
        for index in interface_indices {
            bytes.extend_from_slice(&index.to_be_bytes());
        }
        // empty field, method and attribute tables
        bytes.extend_from_slice(&[0; 6]);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::{fixture::*, *};

    #[test]
    fn parses_header_with_supertypes() {
        let bytes = class_bytes(
            PUBLIC_CLASS,
            "com/example/FooSuite",
            Some("org/scalatest/funsuite/AnyFunSuite"),
            &["java/io/Serializable"],
        );
        let header = ClassHeader::parse(&bytes).unwrap();

        assert_eq!(header.this_class, "com/example/FooSuite");
        assert_eq!(header.super_class.as_deref(), Some("org/scalatest/funsuite/AnyFunSuite"));
        assert_eq!(header.interfaces, ["java/io/Serializable"]);
        assert!(header.access.is_concrete());
        assert_eq!(
            header.supertypes().collect::<Vec<_>>(),
            ["org/scalatest/funsuite/AnyFunSuite", "java/io/Serializable"]
        );
    }

    #[test]
    fn root_class_has_no_superclass() {
        let header = ClassHeader::parse(&class_bytes(PUBLIC_CLASS, "java/lang/Object", None, &[])).unwrap();
        assert_eq!(header.super_class, None);
    }

    #[test]
    fn abstract_and_interfaces_are_not_concrete() {
        assert!(!AccessFlags(AccessFlags::PUBLIC | AccessFlags::ABSTRACT).is_concrete());
        assert!(!AccessFlags(AccessFlags::PUBLIC | AccessFlags::INTERFACE | AccessFlags::ABSTRACT).is_concrete());
        assert!(!AccessFlags(AccessFlags::SUPER).is_concrete());
        assert!(AccessFlags(AccessFlags::PUBLIC | AccessFlags::FINAL).is_concrete());
    }

    #[test]
    fn rejects_bad_magic() {
        assert_eq!(ClassHeader::parse(&[0, 1, 2, 3, 0, 0, 0, 0]), Err(ClassFileError::BadMagic(0x0001_0203)));
    }

    #[test]
    fn rejects_truncated_files() {
        let bytes = class_bytes(PUBLIC_CLASS, "a/B", Some("java/lang/Object"), &[]);
        for len in [0, 3, 9, 20, bytes.len() - 8] {
            let err = ClassHeader::parse(&bytes[..len]).unwrap_err();
            assert!(matches!(err, ClassFileError::Truncated(_)), "len {len}: {err}");
        }
    }

    #[test]
    fn rejects_unknown_constant_tag() {
        let mut bytes = class_bytes(PUBLIC_CLASS, "a/B", None, &[]);
        bytes[10] = 99;
        assert!(matches!(ClassHeader::parse(&bytes), Err(ClassFileError::UnknownTag { tag: 99, index: 1 })));
    }
}
