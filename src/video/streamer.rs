//! Paced video streaming loop
//!
//! The producer side of the pipeline: capture a frame, JPEG-compress it,
//! fragment it into datagrams of at most [`MAX_PAYLOAD`] payload bytes, and
//! send them to the currently registered destination at the target frame
//! rate.
//!
//! # Cycle
//!
//! ```text
//! 1. Read destination registry; none -> sleep 100ms, retry
//! 2. Capture frame; empty/failed -> log, sleep 10ms, retry
//! 3. Compress; failed -> log, skip cycle
//! 4. Fragment and send each datagram in index order
//! 5. Advance the wrapping sequence counter
//! 6. Sleep the remainder of the frame interval
//! ```
//!
//! Every failure mode is non-fatal: the loop only exits when the daemon's
//! running flag clears. Send errors are logged per datagram and never
//! block the loop (fire-and-forget delivery). Frames that take longer
//! than the frame interval to produce are emitted immediately with no
//! catch-up logic.
//!
//! The sequence counter advances once per frame, not per fragment, and
//! never advances on a skipped cycle, so receivers can rely on sequence
//! gaps to mean lost frames rather than local failures.

use crate::camera::FrameSource;
use crate::codec::FrameEncoder;
use crate::state::DestinationRegistry;
use crate::video::protocol::{fragment_count, FragmentHeader, HEADER_LEN, MAX_PAYLOAD};
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Idle sleep while no viewer is registered
const NO_DESTINATION_POLL: Duration = Duration::from_millis(100);

/// Backoff after an empty or failed capture
const CAPTURE_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Emit a diagnostic log line every N frames
const LOG_EVERY_FRAMES: u32 = 60;

/// Video streaming loop over a dedicated UDP send socket
pub struct VideoStreamer {
    socket: UdpSocket,
    camera: Box<dyn FrameSource>,
    encoder: Box<dyn FrameEncoder>,
    destination: DestinationRegistry,
    running: Arc<AtomicBool>,
    frame_interval: Duration,
    sequence: u32,
}

impl VideoStreamer {
    /// Create a streamer targeting `fps` frames per second
    pub fn new(
        socket: UdpSocket,
        camera: Box<dyn FrameSource>,
        encoder: Box<dyn FrameEncoder>,
        destination: DestinationRegistry,
        running: Arc<AtomicBool>,
        fps: u32,
    ) -> Self {
        Self {
            socket,
            camera,
            encoder,
            destination,
            running,
            frame_interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            sequence: 0,
        }
    }

    /// Run the streaming loop until the daemon stops
    pub fn run(&mut self) {
        log::info!(
            "Video streamer started ({}, target {:.0} fps)",
            self.camera.describe(),
            1.0 / self.frame_interval.as_secs_f64()
        );

        if let Err(e) = self.camera.warm_up() {
            log::warn!("Camera warm-up failed: {}", e);
        }

        // Reused for every datagram to avoid allocation per fragment
        let mut send_buffer = Vec::with_capacity(HEADER_LEN + MAX_PAYLOAD);

        while self.running.load(Ordering::Relaxed) {
            let cycle_start = Instant::now();

            let Some(dest) = self.destination.get() else {
                thread::sleep(NO_DESTINATION_POLL);
                continue;
            };

            let frame = match self.camera.capture() {
                Ok(f) if !f.is_empty() => f,
                Ok(_) => {
                    log::warn!("Empty frame from camera");
                    thread::sleep(CAPTURE_RETRY_DELAY);
                    continue;
                }
                Err(e) => {
                    log::warn!("Frame capture failed: {}", e);
                    thread::sleep(CAPTURE_RETRY_DELAY);
                    continue;
                }
            };

            let compressed = match self.encoder.encode(&frame) {
                Ok(data) if !data.is_empty() => data,
                Ok(_) => {
                    log::warn!("Encoder produced an empty frame");
                    continue;
                }
                Err(e) => {
                    log::warn!("Frame encode failed: {}", e);
                    continue;
                }
            };

            self.send_frame(dest, &compressed, &mut send_buffer);

            if self.sequence % LOG_EVERY_FRAMES == 0 {
                log::debug!(
                    "Sent frame {} to {} (len={}, frags={})",
                    self.sequence,
                    dest,
                    compressed.len(),
                    fragment_count(compressed.len())
                );
            }

            self.sequence = self.sequence.wrapping_add(1);

            let elapsed = cycle_start.elapsed();
            if elapsed < self.frame_interval {
                thread::sleep(self.frame_interval - elapsed);
            }
        }

        log::info!("Video streamer stopped");
    }

    /// Fragment one compressed frame and send each datagram in index order
    ///
    /// All fragments of the frame share one sequence number, one timestamp,
    /// and the total frame length. Send errors are logged per datagram; the
    /// remaining fragments are still attempted.
    fn send_frame(&self, dest: SocketAddr, data: &[u8], buffer: &mut Vec<u8>) {
        let frame_len = data.len();
        let frag_cnt = fragment_count(frame_len);
        if frag_cnt > u16::MAX as usize {
            log::error!(
                "Frame of {} bytes exceeds fragment limit, dropped",
                frame_len
            );
            return;
        }
        let timestamp_ms = unix_millis();

        for (idx, payload) in data.chunks(MAX_PAYLOAD).enumerate() {
            let header = FragmentHeader {
                sequence: self.sequence,
                timestamp_ms,
                frame_len: frame_len as u32,
                fragment_index: idx as u16,
                fragment_count: frag_cnt as u16,
            };

            buffer.clear();
            buffer.extend_from_slice(&header.encode());
            buffer.extend_from_slice(payload);

            if let Err(e) = self.socket.send_to(buffer, dest) {
                log::warn!("UDP send to {} failed (fragment {}/{}): {}", dest, idx, frag_cnt, e);
            }
        }
    }
}

/// Milliseconds since the Unix epoch
fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
