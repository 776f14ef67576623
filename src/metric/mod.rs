mod spatial;
mod temporal;


pub use spatial::{haversine_km, spatial_km, EARTH_RADIUS_KM};
pub use temporal::{temporal_days, SECONDS_PER_DAY};
