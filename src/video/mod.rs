//! Video pipeline: wire protocol and the paced streaming loop

pub mod protocol;
pub mod streamer;

pub use protocol::{
    FragmentHeader, DEFAULT_VIDEO_PORT, HEADER_LEN, MAX_PAYLOAD, STREAM_MAGIC,
};
pub use streamer::VideoStreamer;
