//! Even division of a linear span, with leftover units placed from the centre outward.
//! Room placement uses it for gaps between rooms; the chunked stepper uses it for chunk runs.

use std::cmp::Reverse;

/// Index visit order for remainder units: the slot nearest the centre first, then
/// alternating outward. Of two equally central slots the later one goes first.
pub fn center_out_order(count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..count).collect();
    order.sort_by_key(|&index| (index.abs_diff(count - 1 - index), Reverse(index)));
    order
}

/// Splits `total` into `parts` values that differ by at most one.
pub fn split_evenly(total: usize, parts: usize) -> Vec<usize> {
    if parts == 0 {
        return Vec::new();
    }
    let mut values = vec![total / parts; parts];
    let mut remainder = total % parts;
    for index in center_out_order(parts) {
        if remainder == 0 {
            break;
        }
        values[index] += 1;
        remainder -= 1;
    }
    values
}

/// Gaps before, between and after `segment_count` fixed-size segments laid along
/// `total_span`. Returns `segment_count + 1` gaps summing to the leftover span, or `None`
/// when the segments alone overflow the span.
pub fn allocate_gaps(
    total_span: usize,
    segment_count: usize,
    segment_size: usize,
) -> Option<Vec<usize>> {
    let occupied = segment_count.checked_mul(segment_size)?;
    let leftover = total_span.checked_sub(occupied)?;
    Some(split_evenly(leftover, segment_count + 1))
}
