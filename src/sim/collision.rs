//! Collision detection for the ball field
//!
//! Two passes run every tick, in this order:
//! 1. A broad-phase contact scan between balls (bookkeeping only)
//! 2. Wall bounce against the playfield edges

use super::state::Ball;

/// One registered contact pair, `(earlier, later)` in scan order
pub type Contact = (u32, u32);

/// Sweep the balls in insertion order and register contacts
///
/// Each ball is only tested against the balls scanned before it. A seen
/// ball counts as a contact when its range ends past the start of the
/// scanned ball's range on both axes. Both balls record the other.
/// Contact lists are reset first, so they only describe this tick.
///
/// Ranges are spawn-time boxes (see `BallRange`), so this reports spawn
/// overlaps rather than live ones.
pub fn scan_contacts(balls: &mut [Ball]) -> Vec<Contact> {
    for ball in balls.iter_mut() {
        ball.collisions.clear();
    }

    let mut contacts = Vec::new();
    for next in 1..balls.len() {
        let (seen, rest) = balls.split_at_mut(next);
        let next_ball = &mut rest[0];

        let x_hits: Vec<u32> = seen
            .iter()
            .filter(|ball| ball.range.x.end > next_ball.range.x.start)
            .map(|ball| ball.id)
            .collect();

        for ball in seen.iter_mut() {
            let y_hit = ball.range.y.end > next_ball.range.y.start;
            if y_hit && x_hits.contains(&ball.id) {
                ball.touch(next_ball.id);
                next_ball.touch(ball.id);
                contacts.push((ball.id, next_ball.id));
            }
        }
    }
    contacts
}

/// Reflect a ball off the playfield edges
///
/// Flags are reset first, then set for each axis whose edge the centre
/// crossed this tick. Position is left alone, so a ball may sit past the
/// edge for one frame.
pub fn wall_bounce(ball: &mut Ball, width: f32, height: f32) {
    ball.wall_collision.x = false;
    ball.wall_collision.y = false;

    let r = ball.radius;
    if ball.position.x < r || ball.position.x > width - r {
        ball.direction.x = -ball.direction.x;
        ball.wall_collision.x = true;
    }

    let ceiling = ball.position.y < r;
    let floor = ball.position.y > height - r;
    if ceiling || floor {
        ball.direction.y = -ball.direction.y;
        ball.wall_collision.y = true;
    }
}

/// Contact scan followed by wall bounce for every ball
pub fn resolve_collisions(balls: &mut [Ball], width: f32, height: f32) -> Vec<Contact> {
    let contacts = scan_contacts(balls);
    for ball in balls.iter_mut() {
        wall_bounce(ball, width, height);
    }
    contacts
}
