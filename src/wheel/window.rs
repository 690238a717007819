use std::f64::consts::FRAC_PI_2;
use std::fmt;

use crate::wheel::WheelError;

/// Blur applied to the outermost slot, in the renderer's blur units.
pub const BLUR_STRENGTH: f64 = 4.0;
/// Vertical drift unit, in pixels per radian of offset.
pub const OFFSET_UNIT: f64 = 8.0;

/// Stable identity of a slot inside the repeated item sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub item: usize,
    pub lap: usize,
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-r{}", self.item, self.lap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleSlot {
    pub item_index: usize,
    /// Signed distance from the center slot, in `[-radius, radius]`.
    pub angular_offset: isize,
    pub key: SlotKey,
}

impl VisibleSlot {
    pub fn is_center(&self) -> bool {
        self.angular_offset == 0
    }
}

/// How many copies of the item list back the virtual sequence.
pub fn repeat_count(len: usize, radius: usize) -> usize {
    radius.div_ceil(len) * 3
}

/// Computes the window of `2 * radius + 1` slots centered on `current_index`.
///
/// The items are laid out `repeat_count` times back to back and the window is
/// read from that sequence as a ring, so slots left of the first copy come from
/// the end of the last one.
pub fn visible_slots(
    len: usize,
    current_index: usize,
    rotation: u64,
    radius: usize,
) -> Result<Vec<VisibleSlot>, WheelError> {
    if len == 0 {
        return Err(WheelError::EmptyItems);
    }
    if current_index >= len {
        return Err(WheelError::IndexOutOfRange { index: current_index, len });
    }
    if radius == 0 {
        return Err(WheelError::ZeroRadius);
    }

    let laps = repeat_count(len, radius);
    let virtual_len = len * laps;
    let lap = (rotation % laps as u64) as usize;
    let center = lap * len + current_index;

    let radius = radius as isize;
    let slots = (-radius..=radius)
        .map(|offset| {
            let position = (center as isize + offset).rem_euclid(virtual_len as isize) as usize;
            VisibleSlot {
                item_index: position % len,
                angular_offset: offset,
                key: SlotKey {
                    item: position % len,
                    lap: position / len,
                },
            }
        })
        .collect();
    Ok(slots)
}

/// Presentation hints for one slot of the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotStyle {
    pub scale: f64,
    pub blur: f64,
    pub opacity: f64,
    pub offset: f64,
}

impl SlotStyle {
    pub fn for_offset(angular_offset: isize, radius: usize) -> Self {
        let delta = angular_offset as f64;
        let angle = delta / radius.max(1) as f64 * FRAC_PI_2;
        let cos = angle.cos();
        Self {
            scale: cos,
            blur: (1.0 - cos) * BLUR_STRENGTH,
            opacity: 0.2 + 0.8 * cos,
            offset: (delta.sin() - delta) * OFFSET_UNIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn indices(slots: &[VisibleSlot]) -> Vec<usize> {
        slots.iter().map(|s| s.item_index).collect()
    }

    #[test]
    fn window_wraps_to_last_item_on_the_left() {
        let slots = visible_slots(4, 0, 0, 1).unwrap();
        assert_eq!(indices(&slots), vec![3, 0, 1]);
        assert_eq!(
            slots.iter().map(|s| s.angular_offset).collect::<Vec<_>>(),
            vec![-1, 0, 1]
        );
    }

    #[test]
    fn window_has_fixed_width_and_valid_indices() {
        for len in 1..=9 {
            for radius in 1..=6 {
                for rotation in 0..5 {
                    for current in 0..len {
                        let slots = visible_slots(len, current, rotation, radius).unwrap();
                        assert_eq!(slots.len(), 2 * radius + 1);
                        assert!(slots.iter().all(|s| s.item_index < len));
                    }
                }
            }
        }
    }

    #[test]
    fn window_is_a_circular_run_centered_on_current() {
        let (len, radius) = (5, 4);
        for current in 0..len {
            let slots = visible_slots(len, current, 3, radius).unwrap();
            for slot in &slots {
                let expected = (current as isize + slot.angular_offset).rem_euclid(len as isize);
                assert_eq!(slot.item_index, expected as usize);
            }
            assert!(slots[radius].is_center());
            assert_eq!(slots[radius].item_index, current);
        }
    }

    #[test]
    fn keys_are_unique_within_a_frame() {
        for len in 1..=6 {
            for radius in 1..=5 {
                let slots = visible_slots(len, len - 1, 7, radius).unwrap();
                let keys: HashSet<_> = slots.iter().map(|s| s.key).collect();
                assert_eq!(keys.len(), slots.len());
            }
        }
    }

    #[test]
    fn keys_stay_stable_across_a_tick() {
        // Advancing by one step shifts the window; shared slots keep their keys.
        let before = visible_slots(6, 2, 1, 2).unwrap();
        let after = visible_slots(6, 3, 1, 2).unwrap();
        let before_keys: Vec<SlotKey> = before[1..].iter().map(|s| s.key).collect();
        let after_keys: Vec<SlotKey> = after[..4].iter().map(|s| s.key).collect();
        assert_eq!(before_keys, after_keys);
    }

    #[test]
    fn identical_inputs_yield_identical_windows() {
        assert_eq!(visible_slots(7, 3, 11, 4), visible_slots(7, 3, 11, 4));
    }

    #[test]
    fn key_renders_item_and_lap() {
        let slots = visible_slots(2, 1, 1, 1).unwrap();
        let keys: Vec<String> = slots.iter().map(|s| s.key.to_string()).collect();
        assert_eq!(keys, vec!["0-r1", "1-r1", "0-r2"]);
    }

    #[test]
    fn rejects_invalid_arguments() {
        assert_eq!(visible_slots(0, 0, 0, 4), Err(WheelError::EmptyItems));
        assert_eq!(
            visible_slots(3, 3, 0, 4),
            Err(WheelError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(visible_slots(3, 0, 0, 0), Err(WheelError::ZeroRadius));
    }

    #[test]
    fn repeat_count_covers_the_window() {
        assert_eq!(repeat_count(4, 4), 3);
        assert_eq!(repeat_count(2, 4), 6);
        assert_eq!(repeat_count(10, 4), 3);
        for len in 1..20 {
            for radius in 1..10 {
                assert!(len * repeat_count(len, radius) >= 2 * radius + 1);
            }
        }
    }

    #[test]
    fn center_slot_is_sharp_and_edges_fade() {
        let center = SlotStyle::for_offset(0, 4);
        assert_eq!(center.scale, 1.0);
        assert_eq!(center.blur, 0.0);
        assert!((center.opacity - 1.0).abs() < 1e-9);
        assert_eq!(center.offset, 0.0);

        let edge = SlotStyle::for_offset(4, 4);
        assert!(edge.scale.abs() < 1e-9);
        assert!((edge.blur - BLUR_STRENGTH).abs() < 1e-9);
        assert!((edge.opacity - 0.2).abs() < 1e-9);

        let above = SlotStyle::for_offset(-2, 4);
        let below = SlotStyle::for_offset(2, 4);
        assert!((above.opacity - below.opacity).abs() < 1e-9);
        assert!((above.offset + below.offset).abs() < 1e-9);
    }
}
