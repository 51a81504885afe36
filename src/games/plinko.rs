//! Plinko
//!
//! A ball dropped through a 16-row peg pyramid under simple gravity
//! with elastic peg collisions and a small random deflection per hit.
//! The landing bucket indexes a fixed symmetric multiplier table with
//! the big prizes on the edges. The physics run to completion
//! synchronously; animation pacing is the caller's concern.

use crate::errors::ParlorResult;
use crate::games::types::{GameKind, RoundDetail, RoundReport};
use crate::rng::RandomSource;
use crate::session::Session;

pub const ROWS: usize = 16;
const SPACING: f64 = 40.0;
const START_Y: f64 = 50.0;
const GRAVITY: f64 = 0.25;
const FRICTION: f64 = 0.98;
const BOUNCE: f64 = 0.7;
const BOARD_WIDTH: f64 = 800.0;
const COLLISION_RADIUS: f64 = 10.0;
// A dead-center ball can come to rest on the apex peg; the cap resolves
// such balls from wherever they stopped.
const MAX_STEPS: usize = 10_000;

/// Bucket multipliers, edges highest.
pub const MULTIPLIERS: [f64; 17] = [
    110.0, 41.0, 10.0, 5.0, 3.0, 1.5, 1.0, 0.5, 0.3, 0.5, 1.0, 1.5, 3.0, 5.0, 10.0, 41.0, 110.0,
];

struct Ball {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
}

fn pegs() -> Vec<(f64, f64)> {
    let mut pegs = Vec::new();
    for row in 0..ROWS {
        for col in 0..=row {
            let x = BOARD_WIDTH / 2.0 - (row as f64 * SPACING / 2.0) + col as f64 * SPACING;
            let y = START_Y + row as f64 * SPACING;
            pegs.push((x, y));
        }
    }
    pegs
}

/// Bucket index for a final horizontal position, clamped to the table.
fn bucket_for(x: f64) -> usize {
    let left_edge = BOARD_WIDTH / 2.0 - ROWS as f64 * SPACING / 2.0;
    let relative = x - left_edge;
    let index = ((relative + SPACING / 2.0) / SPACING).floor() as i64;
    index.clamp(0, MULTIPLIERS.len() as i64 - 1) as usize
}

/// Drop one ball and return its landing bucket.
fn simulate_drop(rng: &mut dyn RandomSource) -> usize {
    let pegs = pegs();
    let bottom_y = START_Y + ROWS as f64 * SPACING;

    let mut ball = Ball {
        x: BOARD_WIDTH / 2.0 + (rng.next_f64() - 0.5) * 10.0,
        y: 10.0,
        vx: (rng.next_f64() - 0.5) * 2.0,
        vy: 0.0,
    };

    for _ in 0..MAX_STEPS {
        ball.vy += GRAVITY;
        ball.vx *= FRICTION;
        ball.x += ball.vx;
        ball.y += ball.vy;

        for &(px, py) in &pegs {
            let dx = ball.x - px;
            let dy = ball.y - py;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < COLLISION_RADIUS {
                let angle = dy.atan2(dx);
                let speed = (ball.vx * ball.vx + ball.vy * ball.vy).sqrt();
                let jitter = (rng.next_f64() - 0.5) * 0.5;
                ball.vx = (angle + jitter).cos() * speed * BOUNCE;
                ball.vy = (angle + jitter).sin() * speed * BOUNCE;

                let overlap = COLLISION_RADIUS - dist;
                ball.x += angle.cos() * overlap;
                ball.y += angle.sin() * overlap;
            }
        }

        if ball.y > bottom_y + 20.0 {
            break;
        }
    }

    bucket_for(ball.x)
}

/// Play one plinko round: debit, drop, settle by landing bucket.
pub fn play(
    session: &mut Session,
    rng: &mut dyn RandomSource,
    stake: f64,
) -> ParlorResult<RoundReport> {
    let receipt = session.place_bet(stake)?;
    let bucket = simulate_drop(rng);
    let multiplier = MULTIPLIERS[bucket];
    let payout = stake * multiplier;
    let entry = session.settle(receipt, payout, GameKind::Plinko, multiplier);

    Ok(RoundReport {
        game: GameKind::Plinko,
        bet: stake,
        payout,
        multiplier,
        outcome: entry.outcome,
        detail: RoundDetail::Plinko {
            bucket: bucket as u8,
        },
    })
}
