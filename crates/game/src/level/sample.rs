use glam::Vec2;

use crate::geometry::Rect;
use crate::gravity::GravityDirection;

use super::{DoorDef, LevelData, MovingPlatformDef};

/// Built-in levels used when no level file is supplied.
pub fn sample_levels() -> Vec<LevelData> {
    vec![first_fall(), split_lock()]
}

/// Three platforms with the spawn resting on the middle one and a block
/// standing on it to the right.
pub fn walled_floor() -> LevelData {
    LevelData {
        name: String::from("walled-floor"),
        platforms: vec![
            Rect::new(0.0, 300.0, 150.0, 20.0),
            Rect::new(200.0, 400.0, 500.0, 40.0),
            Rect::new(600.0, 340.0, 60.0, 60.0),
        ],
        exit: Rect::new(880.0, 100.0, 40.0, 60.0),
        spawn: Vec2::new(300.0, 368.0),
        spawn_gravity: GravityDirection::Down,
        par_time: 20.0,
        ..LevelData::default()
    }
}

fn first_fall() -> LevelData {
    let mut level = LevelData {
        name: String::from("first-fall"),
        spawn: Vec2::new(60.0, 428.0),
        exit: Rect::new(880.0, 20.0, 40.0, 60.0),
        par_time: 25.0,
        ..LevelData::default()
    };

    add_floor_with_gap(&mut level);
    add_ceiling_shelf(&mut level);

    level.spikes.push(Rect::new(420.0, 444.0, 80.0, 16.0));
    level.checkpoints.push(Vec2::new(560.0, 430.0));
    level.orbs.extend([Vec2::new(300.0, 420.0), Vec2::new(700.0, 60.0), Vec2::new(880.0, 300.0)]);

    level
}

fn add_floor_with_gap(level: &mut LevelData) {
    level.platforms.push(Rect::new(0.0, 460.0, 380.0, 80.0));
    level.platforms.push(Rect::new(520.0, 460.0, 440.0, 80.0));
}

fn add_ceiling_shelf(level: &mut LevelData) {
    level.platforms.push(Rect::new(600.0, 0.0, 360.0, 20.0));
    level.platforms.push(Rect::new(840.0, 80.0, 120.0, 20.0));
}

fn split_lock() -> LevelData {
    let mut level = LevelData {
        name: String::from("split-lock"),
        spawn: Vec2::new(80.0, 428.0),
        exit: Rect::new(880.0, 400.0, 40.0, 60.0),
        par_time: 40.0,
        ..LevelData::default()
    };

    level.platforms.push(Rect::new(0.0, 460.0, 960.0, 80.0));
    level.platforms.push(Rect::new(0.0, 0.0, 960.0, 20.0));

    level.moving_platforms.push(MovingPlatformDef {
        rect: Rect::new(300.0, 300.0, 120.0, 16.0),
        end: Vec2::new(300.0, 120.0),
        speed: 60.0,
    });

    add_button_pair(&mut level);

    level.orbs.extend([Vec2::new(360.0, 90.0), Vec2::new(700.0, 430.0)]);
    level.checkpoints.push(Vec2::new(500.0, 430.0));

    level
}

fn add_button_pair(level: &mut LevelData) {
    level.buttons.push(Rect::new(200.0, 454.0, 40.0, 6.0));
    level.buttons.push(Rect::new(600.0, 454.0, 40.0, 6.0));
    level.doors.push(DoorDef {
        rect: Rect::new(800.0, 20.0, 24.0, 440.0),
        links: vec![0, 1],
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_sit_inside_bounds_and_clear_of_platforms() {
        let mut levels = sample_levels();
        levels.push(walled_floor());

        for level in levels {
            let body = Rect::new(level.spawn.x, level.spawn.y, 24.0, 32.0);
            assert!(body.right() <= level.size.x && body.bottom() <= level.size.y, "{}", level.name);
            assert!(
                level.platforms.iter().all(|p| !p.overlaps(&body)),
                "{} spawn overlaps a platform",
                level.name
            );
        }
    }
}
