pub mod points;
pub mod position;
pub mod profection;
pub mod rulers;
pub mod sign;

pub use points::{Angle, ChartPoint, ANGLES};
pub use position::{normalize_degrees, normalize_signed, Position};
pub use profection::{age_in_years, profection, ProfectionYear};
pub use rulers::{ruled_houses, ruled_signs, sign_ruler};
pub use sign::{house_from_sign, sign_to_modality, Modality, Sign, SIGNS};
