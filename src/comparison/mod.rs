pub mod matcher;
pub mod rooms;

pub use matcher::{match_objects, Bucket, ComparedObject, ObjectBuckets};
pub use rooms::{compare_inspections, compare_room, RoomComparison};
