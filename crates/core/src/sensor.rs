//! Sensor matrix seam.
//!
//! The electrical column/row scan (settle delay per column, debounce) lives in
//! a hardware driver outside this crate. The core only needs one full reading
//! on demand.

use std::sync::{Arc, Mutex};

use crate::error::{ChessyError, Result};
use crate::occupancy::OccupancySnapshot;
use crate::types::Position;

/// Produces an occupancy reading on demand. May block for the driver's settle time.
pub trait SensorMatrix {
    fn scan(&mut self) -> Result<OccupancySnapshot>;
}

impl<S: SensorMatrix + ?Sized> SensorMatrix for &mut S {
    fn scan(&mut self) -> Result<OccupancySnapshot> {
        (**self).scan()
    }
}

/// In-memory sensor for tests and the simulator.
///
/// Clones share the same reading, so one handle can be given to the game loop
/// while another is toggled from elsewhere (a console thread, a test).
#[derive(Debug, Clone, Default)]
pub struct MockSensor {
    state: Arc<Mutex<OccupancySnapshot>>,
}

impl MockSensor {
    pub fn new(initial: OccupancySnapshot) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
        }
    }

    /// Flip one cell (a piece lifted or put down).
    pub fn toggle(&self, pos: Position) {
        if let Ok(mut snap) = self.state.lock() {
            snap.toggle(pos);
        }
    }

    pub fn set(&self, pos: Position, occupied: bool) {
        if let Ok(mut snap) = self.state.lock() {
            snap.set(pos, occupied);
        }
    }

    /// Replace the whole reading.
    pub fn load(&self, snapshot: OccupancySnapshot) {
        if let Ok(mut snap) = self.state.lock() {
            *snap = snapshot;
        }
    }

    pub fn current(&self) -> OccupancySnapshot {
        self.state.lock().map(|s| *s).unwrap_or_default()
    }
}

impl SensorMatrix for MockSensor {
    fn scan(&mut self) -> Result<OccupancySnapshot> {
        self.state
            .lock()
            .map(|s| *s)
            .map_err(|_| ChessyError::Sensor("mock sensor state poisoned".to_string()))
    }
}

/// Replays a fixed sequence of readings, repeating the last one forever.
#[derive(Debug, Clone)]
pub struct ScriptedSensor {
    readings: Vec<OccupancySnapshot>,
    next: usize,
}

impl ScriptedSensor {
    pub fn new(readings: Vec<OccupancySnapshot>) -> Self {
        Self { readings, next: 0 }
    }

    pub fn scans(&self) -> usize {
        self.next
    }
}

impl SensorMatrix for ScriptedSensor {
    fn scan(&mut self) -> Result<OccupancySnapshot> {
        let idx = self.next.min(self.readings.len().saturating_sub(1));
        let reading = self
            .readings
            .get(idx)
            .copied()
            .ok_or_else(|| ChessyError::Sensor("no scripted readings".to_string()))?;
        self.next += 1;
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_sensor_clones_share_state() {
        let sensor = MockSensor::default();
        let mut reader = sensor.clone();
        let p = Position::new(2, 3).unwrap();
        sensor.toggle(p);
        assert!(reader.scan().unwrap().get(p));
        sensor.set(p, false);
        assert!(!reader.scan().unwrap().get(p));
    }

    #[test]
    fn scripted_sensor_repeats_last_reading() {
        let a = OccupancySnapshot::from_bits(1);
        let b = OccupancySnapshot::from_bits(2);
        let mut sensor = ScriptedSensor::new(vec![a, b]);
        assert_eq!(sensor.scan().unwrap(), a);
        assert_eq!(sensor.scan().unwrap(), b);
        assert_eq!(sensor.scan().unwrap(), b);
        assert_eq!(sensor.scans(), 3);
    }

    #[test]
    fn empty_script_is_a_sensor_error() {
        let mut sensor = ScriptedSensor::new(Vec::new());
        assert!(matches!(sensor.scan(), Err(ChessyError::Sensor(_))));
    }
}
