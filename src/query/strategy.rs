use crate::query::QueryFailure;
use num::FromPrimitive;
use num_derive::FromPrimitive;

/// The algorithms used by a distance query when the shapes are not both spheres.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum GjkStrategy {
    /// GJK then EPA, both running on the margin-inflated shapes.
    GjkEpa = 0,
    /// GJK then EPA, both running on the bare cores of the shapes. The margins are added to
    /// the result afterwards.
    GjkEpaUnmarginedRadius = 1,
    /// GJK, then MPR if GJK does not find the shapes to be separated.
    GjkMpr = 2,
}

impl TryFrom<u32> for GjkStrategy {
    type Error = QueryFailure;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        GjkStrategy::from_u32(raw).ok_or(QueryFailure::InvalidStrategy(raw))
    }
}
