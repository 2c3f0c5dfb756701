//! Live sensor payload format.
//!
//! The vest notifies one characteristic per sensor. Only the accelerometer
//! characteristic carries data the core consumes: four little-endian `f32`
//! values.
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────────┐
//! │ x (g)    │ y (g)    │ z (g)    │ magnitude (g)│
//! │ 4 bytes  │ 4 bytes  │ 4 bytes  │ 4 bytes      │
//! └──────────┴──────────┴──────────┴──────────────┘
//! ```
//!
//! Trailing bytes beyond the 16-byte record are ignored.

use crate::error::WireError;
use crate::types::AccelVector;

// ============================================================================
// CONSTANTS
// ============================================================================

/// GATT service exposed by the vest.
pub const VEST_SERVICE_UUID: &str = "4fafc201-1fb5-459e-8fcc-c5c9c331914b";

/// Temperature characteristic.
pub const TEMPERATURE_CHARACTERISTIC_UUID: &str = "beb5483e-36e1-4688-b7f5-ea07361b26a8";

/// PPG characteristic.
pub const PPG_CHARACTERISTIC_UUID: &str = "beb5483e-36e1-4688-b7f5-ea07361b26a9";

/// Accelerometer characteristic.
pub const ACCEL_CHARACTERISTIC_UUID: &str = "beb5483e-36e1-4688-b7f5-ea07361b26aa";

// ============================================================================
// ACCELEROMETER (16 bytes payload)
// ============================================================================

/// Accelerometer notification - 16 bytes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireAccel {
    /// X axis in g (f32 as u32 bits)
    pub x_bits: u32,            // 4 bytes
    /// Y axis in g
    pub y_bits: u32,            // 4 bytes
    /// Z axis in g
    pub z_bits: u32,            // 4 bytes
    /// Magnitude computed on the vest
    pub magnitude_bits: u32,    // 4 bytes
}                               // Total: 16 bytes

impl WireAccel {
    pub const SIZE: usize = 16;

    #[inline]
    pub fn from_vector(v: &AccelVector) -> Self {
        Self {
            x_bits: v.x.to_bits(),
            y_bits: v.y.to_bits(),
            z_bits: v.z.to_bits(),
            magnitude_bits: v.magnitude.to_bits(),
        }
    }

    /// Write to buffer. Returns bytes written.
    #[inline]
    pub fn write_to(&self, buf: &mut [u8]) -> usize {
        if buf.len() < Self::SIZE {
            return 0;
        }
        buf[0..4].copy_from_slice(&self.x_bits.to_le_bytes());
        buf[4..8].copy_from_slice(&self.y_bits.to_le_bytes());
        buf[8..12].copy_from_slice(&self.z_bits.to_le_bytes());
        buf[12..16].copy_from_slice(&self.magnitude_bits.to_le_bytes());
        Self::SIZE
    }

    /// Read from buffer.
    #[inline]
    pub fn read_from(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            x_bits: u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            y_bits: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            z_bits: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            magnitude_bits: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
        })
    }

    #[inline]
    pub fn x(&self) -> f32 { f32::from_bits(self.x_bits) }
    #[inline]
    pub fn y(&self) -> f32 { f32::from_bits(self.y_bits) }
    #[inline]
    pub fn z(&self) -> f32 { f32::from_bits(self.z_bits) }
    #[inline]
    pub fn magnitude(&self) -> f32 { f32::from_bits(self.magnitude_bits) }

    /// Vector as reported by the vest, magnitude included.
    pub fn to_vector(&self) -> AccelVector {
        AccelVector::with_magnitude(self.x(), self.y(), self.z(), self.magnitude())
    }
}

/// Encode a vector into a notification payload.
pub fn encode_accel(v: &AccelVector) -> [u8; WireAccel::SIZE] {
    let mut buf = [0u8; WireAccel::SIZE];
    WireAccel::from_vector(v).write_to(&mut buf);
    buf
}

/// Decode an accelerometer notification.
///
/// Axes must be finite. The magnitude is passed through as sent; a
/// non-finite magnitude is recovered from the axes during ingestion.
pub fn decode_accel(payload: &[u8]) -> Result<AccelVector, WireError> {
    let wire = WireAccel::read_from(payload).ok_or(WireError::Truncated {
        needed: WireAccel::SIZE,
        got: payload.len(),
    })?;

    for (field, value) in [("x", wire.x()), ("y", wire.y()), ("z", wire.z())] {
        if !value.is_finite() {
            return Err(WireError::NonFinite { field });
        }
    }

    Ok(wire.to_vector())
}

// ============================================================================
// TESTS
// ============================================================================
