use super::error::StoreError;
use super::file::TraceId;
use super::store::TraceStore;
use super::trace::GpsTrace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was stored for this file yet, the trace was saved.
    Written,
    /// The stored trace is identical to the new one.
    Skipped,
    /// The stored trace differs. It is left untouched.
    Conflict,
}

// Stored traces are never replaced. A different trace for the same file
// is a conflict that someone has to look at.
pub fn reconcile<S: TraceStore>(
    store: &S,
    id: &TraceId,
    trace: &GpsTrace,
) -> Result<Outcome, StoreError> {
    let Some(existing) = store.load(id)? else {
        store.save(id, &trace.to_json()?)?;
        return Ok(Outcome::Written);
    };

    match GpsTrace::from_json(&existing) {
        Ok(existing) if existing == *trace => Ok(Outcome::Skipped),
        Ok(_) => Ok(Outcome::Conflict),
        Err(err) => {
            tracing::warn!(%id, "stored trace is not readable: {err}");
            Ok(Outcome::Conflict)
        }
    }
}
