/// Data layer: core types, loading, and normalisation.
///
/// Architecture:
/// ```text
///  .xy exports (per mesh)      airfoil .csv
///        │                          │
///        ▼                          ▼
///   ┌──────────┐              ┌──────────┐
///   │  loader   │ sort by x   │  loader   │ scale X, Y
///   └──────────┘              └──────────┘
///        │                          │
///        ▼                          │
///   ┌───────────┐                   │
///   │ normalize  │  x → x/c         │
///   └───────────┘                   │
///        │                          │
///        ▼                          ▼
///   ┌──────────────┐        ┌────────────────┐
///   │ DatasetGroup  │        │ AirfoilGeometry │
///   └──────────────┘        └────────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod normalize;
pub mod study;
