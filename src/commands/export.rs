//! `gitdraw export` command.
//!
//! Writes the same instruction stream `draw` feeds to `git fast-import`, so
//! it can be piped into an existing repository by hand.

use std::cell::RefCell;
use std::io::Write;
use std::path::Path;

use crate::cli::DesignArgs;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::plan::DrawPlan;
use crate::ports::StreamConsumer;
use crate::stream::Outcome;

/// Prints the fast-import stream for a drawing on stdout.
///
/// # Errors
///
/// Returns an error for invalid input or if stdout is closed.
pub fn run(ctx: &ServiceContext, design: &DesignArgs) -> Result<(), Error> {
    let stdout = std::io::stdout();
    export_to(ctx, design, stdout.lock()).map(|_| ())
}

fn export_to<W: Write>(ctx: &ServiceContext, design: &DesignArgs, out: W) -> Result<Outcome, Error> {
    let now = ctx.clock.now();
    let request = super::request_from_args(ctx, design, now)?;
    let plan = DrawPlan::build(&request, now);
    let consumer = WriterConsumer(RefCell::new(out));
    ctx.synthesizer()?.synthesize(
        &consumer,
        Path::new("."),
        &plan.background,
        &plan.foreground,
        &mut |_| {},
    )
}

/// Feeds the stream straight into a writer.
struct WriterConsumer<W>(RefCell<W>);

impl<W: Write> StreamConsumer for WriterConsumer<W> {
    fn run_consumer(
        &self,
        _repo: &Path,
        feed: &mut dyn FnMut(&mut dyn Write) -> std::io::Result<()>,
    ) -> Result<(), Error> {
        let mut out = self.0.borrow_mut();
        feed(&mut *out).map_err(|e| Error::io("writing commit stream", e))
    }
}
