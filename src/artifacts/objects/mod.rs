pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of an object ID in hexadecimal characters (SHA-1)
pub const OBJECT_ID_LENGTH: usize = 40;
