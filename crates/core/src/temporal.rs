/// A model input that carries a point in simulation time.
///
/// Time-span driven solvers read the time of each input to decide when a run
/// has reached its final boundary. Times are plain seconds.
///
/// # Example
///
/// ```
/// use halflife_core::Temporal;
///
/// struct Sample {
///     time: f64,
///     value: f64,
/// }
///
/// impl Temporal for Sample {
///     fn time(&self) -> f64 {
///         self.time
///     }
/// }
///
/// let sample = Sample { time: 12.5, value: 3.0 };
/// assert_eq!(sample.time(), 12.5);
/// ```
pub trait Temporal {
    /// Returns the simulation time in seconds.
    fn time(&self) -> f64;
}
