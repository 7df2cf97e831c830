pub mod kinematics;
pub mod params;
pub mod results;
pub mod vector;
pub mod window;
