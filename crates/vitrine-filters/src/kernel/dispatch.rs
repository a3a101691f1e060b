use vitrine_engine::coords::PixelRect;

use crate::FilterError;

/// Threads per workgroup along x and y. Must match `@workgroup_size` in the
/// kernel library.
pub const WORKGROUP_SIZE: u32 = 8;

/// What one kernel application reads, writes and dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPlan {
    pub dest: PixelRect,
    /// Region of the input uploaded for the kernel, inside the input extent.
    pub source: PixelRect,
    pub workgroups: [u32; 2],
}

/// Asks `roi` which input pixels producing `dest` needs and clamps the answer
/// to `input`.
///
/// `roi` is called once with the input index (always 0) and `dest`.
pub fn plan_dispatch<F>(
    kernel: &'static str,
    input: PixelRect,
    dest: PixelRect,
    roi: F,
) -> Result<DispatchPlan, FilterError>
where
    F: Fn(usize, PixelRect) -> PixelRect,
{
    if dest.is_empty() {
        return Err(FilterError::EmptyRegion { kernel, dest });
    }

    let wanted = roi(0, dest);
    let source = input
        .intersect(wanted)
        .ok_or(FilterError::EmptyRegion { kernel, dest })?;

    log::trace!("{kernel}: dest {dest:?} reads {source:?} (asked for {wanted:?})");

    Ok(DispatchPlan {
        dest,
        source,
        workgroups: [
            dest.width.div_ceil(WORKGROUP_SIZE),
            dest.height.div_ceil(WORKGROUP_SIZE),
        ],
    })
}
