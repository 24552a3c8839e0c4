//! Receipt print pipeline.
//!
//! A print request assembles the two-copy document, stages it on a fresh
//! isolated rendering surface provided by the host, and returns. Two
//! independently scheduled tasks finish the job:
//!
//! - the print trigger, fired once on the surface's ready signal or after the
//!   ready fallback, whichever comes first;
//! - the teardown, which detaches the surface a fixed delay after the
//!   trigger whether printing succeeded, failed or was cancelled.
//!
//! Callers never observe the outcome. Failures are logged, never returned.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, error, info};

use crate::config::PrintConfig;
use crate::document::assemble_document;
use crate::error::PrintError;
use crate::model::{Order, Settings};

// ---------------------------------------------------------------------------
// Host seam
// ---------------------------------------------------------------------------

/// An isolated, off-screen document context used to stage a receipt before
/// invoking the platform print dialog.
pub trait PrintSurface: Send + Sync + 'static {
    /// Open the surface's document and write the full HTML into it.
    fn write(&self, html: &str) -> Result<(), PrintError>;

    /// One-shot signal fired once the written document has loaded. `None`
    /// when the surface has no way to signal, in which case printing is
    /// triggered straight away.
    fn ready(&self) -> Option<oneshot::Receiver<()>>;

    /// Bring the surface forward before printing.
    fn focus(&self) {}

    /// Invoke the platform print dialog.
    fn print(&self) -> Result<(), PrintError>;

    /// Whether the surface is still part of the host.
    fn is_attached(&self) -> bool;

    /// Remove the surface from the host.
    fn detach(&self);
}

/// Creates rendering surfaces, one per print request.
pub trait PrintHost {
    type Surface: PrintSurface;

    fn create_surface(&self) -> Result<Self::Surface, PrintError>;
}

// ---------------------------------------------------------------------------
// Print request
// ---------------------------------------------------------------------------

/// Print `order` as a two-copy receipt on a new surface from `host`.
///
/// Returns as soon as the document is written to the surface. Must be called
/// from inside a Tokio runtime; without one the request is logged and dropped.
pub fn print_receipt<H: PrintHost>(
    host: &H,
    order: &Order,
    settings: Option<&Settings>,
    copies: u32,
    config: &PrintConfig,
) {
    let order_number = order.order_number.clone();

    let runtime = match Handle::try_current() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(order_number = %order_number, error = %e, "No runtime to schedule receipt printing");
            return;
        }
    };

    let document = assemble_document(order, settings, copies);

    let surface = match host.create_surface() {
        Ok(surface) => Arc::new(surface),
        Err(e) => {
            error!(order_number = %order_number, error = %e, "Could not open print dialog");
            return;
        }
    };

    if let Err(e) = surface.write(document.as_html()) {
        surface.detach();
        error!(order_number = %order_number, error = %e, "Could not open print dialog");
        return;
    }

    let ready = surface.ready();
    info!(order_number = %order_number, "Receipt staged for printing");

    schedule_print(
        &runtime,
        surface,
        ready,
        config.ready_fallback(),
        config.teardown_delay(),
        order_number,
    );
}

fn schedule_print<S: PrintSurface>(
    runtime: &Handle,
    surface: Arc<S>,
    ready: Option<oneshot::Receiver<()>>,
    ready_fallback: Duration,
    teardown_delay: Duration,
    order_number: String,
) {
    let teardown_runtime = runtime.clone();
    runtime.spawn(async move {
        if let Some(ready) = ready {
            tokio::select! {
                _ = wait_ready(ready) => {
                    debug!(order_number = %order_number, "Print surface ready");
                }
                _ = tokio::time::sleep(ready_fallback) => {
                    debug!(order_number = %order_number, "Print surface ready signal timed out");
                }
            }
        }
        trigger_print(surface.as_ref(), &order_number);
        schedule_teardown(&teardown_runtime, surface, teardown_delay, order_number);
    });
}

/// A dropped sender means the signal will never come; leave it to the fallback.
async fn wait_ready(ready: oneshot::Receiver<()>) {
    if ready.await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn trigger_print<S: PrintSurface>(surface: &S, order_number: &str) {
    surface.focus();
    match surface.print() {
        Ok(()) => info!(order_number = %order_number, "Print dialog opened"),
        Err(e) => error!(order_number = %order_number, error = %e, "Print error"),
    }
}

fn schedule_teardown<S: PrintSurface>(
    runtime: &Handle,
    surface: Arc<S>,
    delay: Duration,
    order_number: String,
) {
    runtime.spawn(async move {
        tokio::time::sleep(delay).await;
        if surface.is_attached() {
            surface.detach();
            debug!(order_number = %order_number, "Print surface removed");
        }
    });
}
