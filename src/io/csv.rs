use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::kinematics::speed_at;
use crate::engine::state::TrajectoryData;
use crate::io::ExportError;

/// Columns: time, pos_x, pos_y, vel_x, vel_y, speed
pub fn write_trajectory<W: Write>(
    writer: &mut W,
    trajectory: &TrajectoryData,
) -> Result<(), ExportError> {
    writeln!(writer, "time,pos_x,pos_y,vel_x,vel_y,speed")?;

    for s in trajectory.iter() {
        writeln!(
            writer,
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            s.elapsed_s,
            s.position.x,
            s.position.y,
            s.velocity.x,
            s.velocity.y,
            speed_at(s.velocity),
        )?;
    }

    Ok(())
}

pub fn write_trajectory_file(path: &Path, trajectory: &TrajectoryData) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_trajectory(&mut writer, trajectory)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vector::Vector2D;
    use crate::engine::state::TrajectorySample;

    #[test]
    fn header_and_one_row_per_sample() {
        let mut data = TrajectoryData::default();
        data.push(TrajectorySample {
            position: Vector2D::ZERO,
            velocity: Vector2D::new(3.0, 4.0),
            elapsed_s: 0.0,
        });
        data.push(TrajectorySample {
            position: Vector2D::new(1.5, 1.2),
            velocity: Vector2D::new(3.0, -4.0),
            elapsed_s: 0.5,
        });

        let mut buf = Vec::new();
        write_trajectory(&mut buf, &data).expect("write to memory");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "time,pos_x,pos_y,vel_x,vel_y,speed");
        assert_eq!(lines[1], "0.0000,0.0000,0.0000,3.0000,4.0000,5.0000");
        assert_eq!(lines[2], "0.5000,1.5000,1.2000,3.0000,-4.0000,5.0000");
    }
}
