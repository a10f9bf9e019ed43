use frame_motion_core::Correspondence;

/// Keep only successfully tracked correspondences, order preserved.
///
/// The caller decides what a too-small survivor set means; this function
/// never fails.
pub fn retain_tracked(correspondences: Vec<Correspondence>) -> Vec<Correspondence> {
    correspondences.into_iter().filter(|c| c.tracked).collect()
}

/// Number of correspondences flagged as tracked.
pub fn tracked_count(correspondences: &[Correspondence]) -> usize {
    correspondences.iter().filter(|c| c.tracked).count()
}
