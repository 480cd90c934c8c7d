//! Profiling utilities based on the `puffin` crate.
//!
//! Scopes are always compiled in; they cost a relaxed atomic load while
//! `puffin::set_scopes_on(false)` (the default). The HTTP viewer server is
//! only available with the `profiling` feature.

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Profiling backend options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Record scopes in-process only (for tests and headless tools).
    InProcess,
    /// Serve profiling data to `puffin_viewer` over HTTP on the given address.
    #[cfg(feature = "profiling")]
    PuffinHttp { addr: String },
}

impl ProfilingBackend {
    /// The HTTP backend on puffin's conventional port.
    #[cfg(feature = "profiling")]
    pub fn http_default() -> Self {
        ProfilingBackend::PuffinHttp {
            addr: format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT),
        }
    }
}

#[cfg(feature = "profiling")]
static PROFILING_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Enable profiling scopes and start the selected backend.
///
/// # Example
/// ```no_run
/// use glyphlist_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::InProcess);
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    puffin::set_scopes_on(true);

    match backend {
        ProfilingBackend::InProcess => {
            tracing::debug!("Puffin scopes enabled (in-process only)");
        }
        #[cfg(feature = "profiling")]
        ProfilingBackend::PuffinHttp { addr } => match puffin_http::Server::new(&addr) {
            Ok(server) => {
                tracing::info!("Puffin profiler server started on http://{}", addr);
                let _ = PROFILING_SERVER.set(server);
            }
            Err(e) => {
                tracing::error!("Failed to start puffin server on {}: {}", addr, e);
            }
        },
    }
}

/// Mark a frame boundary. Call once per frame, after the text flush.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
