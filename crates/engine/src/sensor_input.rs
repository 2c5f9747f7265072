//! Sensor-matrix front end: a [`MovementDetector`] polled at a fixed interval.

use std::time::Duration;

use crate::core::{
    CancelToken, InputEvent, InputSource, MovementDetector, OccupancySnapshot, Result,
    SensorMatrix, Wait, Waiter,
};

pub struct SensorInput<S> {
    sensor: S,
    detector: MovementDetector,
    primed: bool,
    waiter: Waiter,
}

impl<S: SensorMatrix> SensorInput<S> {
    pub fn new(sensor: S, poll_interval: Duration) -> Self {
        Self {
            sensor,
            detector: MovementDetector::new(),
            primed: false,
            waiter: Waiter::new(poll_interval),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.waiter = self.waiter.with_timeout(timeout);
        self
    }
}

impl<S: SensorMatrix> InputSource for SensorInput<S> {
    fn next_event(&mut self, cancel: &CancelToken) -> Result<Wait<InputEvent>> {
        if !self.primed {
            let baseline = self.sensor.scan()?;
            self.prime(baseline);
        }

        let Self {
            sensor,
            detector,
            waiter,
            ..
        } = self;
        let changed = waiter.poll_until(cancel, || detector.poll(&mut *sensor))?;
        Ok(changed.map(InputEvent::Square))
    }

    fn sensor(&mut self) -> Option<&mut dyn SensorMatrix> {
        Some(&mut self.sensor)
    }

    /// Seed the detector, typically with the reading that passed setup.
    ///
    /// Without it the first wait scans once and takes that as the baseline.
    fn prime(&mut self, snapshot: OccupancySnapshot) {
        self.detector.prime(snapshot);
        self.primed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, ScriptedSensor};
    use crate::types::Position;

    const FAST: Duration = Duration::from_millis(1);

    #[test]
    fn reports_first_changed_square() {
        let start = Board::new().occupancy();
        let mut lifted = start;
        lifted.set(Position::from_algebraic("e2").unwrap(), false);

        let sensor = ScriptedSensor::new(vec![start, start, start, lifted]);
        let mut input = SensorInput::new(sensor, FAST);

        assert_eq!(
            input.next_event(&CancelToken::new()).unwrap(),
            Wait::Ready(InputEvent::Square(Position::from_algebraic("e2").unwrap()))
        );
    }

    #[test]
    fn primed_baseline_is_not_reported() {
        let start = Board::new().occupancy();
        let sensor = ScriptedSensor::new(vec![start]);
        let mut input = SensorInput::new(sensor, FAST).with_timeout(Some(Duration::from_millis(15)));
        input.prime(start);
        assert_eq!(input.next_event(&CancelToken::new()).unwrap(), Wait::TimedOut);
    }

    #[test]
    fn sensor_errors_propagate() {
        let mut input = SensorInput::new(ScriptedSensor::new(Vec::new()), FAST);
        assert!(input.next_event(&CancelToken::new()).is_err());
    }

    #[test]
    fn exposes_its_sensor_for_setup() {
        let start = Board::new().occupancy();
        let mut input = SensorInput::new(ScriptedSensor::new(vec![start]), FAST);
        let sensor = input.sensor().expect("sensor-driven source");
        assert_eq!(sensor.scan().unwrap(), start);
    }
}
