/// GET /api/healthz - readiness probe
///
/// Static by design: the process being up is the signal. Database health
/// shows up as errors on the endpoints that need it.
pub async fn healthz() -> &'static str {
    "OK"
}
