//! DrishtiIO daemon entry point
//!
//! Wires the three long-running loops together:
//!
//! - Subscription listener (UDP 5007): registers the video destination
//! - Command listener (UDP 5005): updates command state, seeds destination
//! - Video streamer: captures, compresses, fragments, sends
//!
//! Listener bind failures disable only the affected component; the rest of
//! the daemon keeps running.

use drishti_io::camera::create_camera;
use drishti_io::codec::JpegFrameEncoder;
use drishti_io::config::AppConfig;
use drishti_io::control::{CommandListener, SubscriptionListener};
use drishti_io::error::{Error, Result};
use drishti_io::state::{CommandState, DestinationRegistry};
use drishti_io::video::VideoStreamer;
use std::env;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `drishti-io <path>` (positional)
/// - `drishti-io --config <path>` (flag-based)
/// - `drishti-io -c <path>` (short flag)
///
/// Defaults to `/etc/drishti.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "/etc/drishti.toml".to_string()
}

fn main() -> Result<()> {
    let config_path = parse_config_path();
    let (config, config_found) = if Path::new(&config_path).exists() {
        (AppConfig::from_file(&config_path)?, true)
    } else {
        (AppConfig::defaults(), false)
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();

    log::info!("DrishtiIO v0.1.0 starting...");
    if config_found {
        log::info!("Using config: {}", config_path);
    } else {
        log::warn!("Config {} not found, using built-in defaults", config_path);
    }

    // Shutdown flag observed by all three loops
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let destination = DestinationRegistry::new();
    let command_state = CommandState::new();

    // =========================================================================
    // Control plane: subscription and command listeners
    // =========================================================================
    let sub_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.network.subscribe_port));
    match SubscriptionListener::bind(
        sub_addr,
        destination.clone(),
        config.network.default_video_port,
        Arc::clone(&running),
    ) {
        Ok(mut listener) => {
            thread::Builder::new()
                .name("sub-listener".to_string())
                .spawn(move || listener.run())
                .map_err(|e| {
                    Error::Other(format!("Failed to spawn subscription listener: {}", e))
                })?;
        }
        Err(e) => log::error!("Subscription listener disabled (bind {}): {}", sub_addr, e),
    }

    let cmd_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.network.command_port));
    match CommandListener::bind(
        cmd_addr,
        destination.clone(),
        command_state.clone(),
        config.network.default_video_port,
        Arc::clone(&running),
    ) {
        Ok(mut listener) => {
            thread::Builder::new()
                .name("cmd-listener".to_string())
                .spawn(move || listener.run())
                .map_err(|e| Error::Other(format!("Failed to spawn command listener: {}", e)))?;
        }
        Err(e) => log::error!("Command listener disabled (bind {}): {}", cmd_addr, e),
    }

    // =========================================================================
    // Video plane: camera, encoder, send socket, streaming loop (main thread)
    // =========================================================================
    log::info!("DrishtiIO running. Press Ctrl-C to stop.");

    let video_setup = || -> Result<VideoStreamer> {
        let camera = create_camera(&config.camera, &config.video)?;
        let encoder = Box::new(JpegFrameEncoder::new(config.video.jpeg_quality));
        let socket = UdpSocket::bind("0.0.0.0:0")
            .map_err(|e| Error::Other(format!("Failed to create video send socket: {}", e)))?;
        Ok(VideoStreamer::new(
            socket,
            camera,
            encoder,
            destination.clone(),
            Arc::clone(&running),
            config.video.fps,
        ))
    };

    match video_setup() {
        Ok(mut streamer) => streamer.run(),
        Err(e) => {
            // Video plane disabled; keep the control plane alive
            log::error!("Video streaming disabled: {}", e);
            while running.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_millis(100));
            }
        }
    }

    log::info!("DrishtiIO stopped");
    Ok(())
}
