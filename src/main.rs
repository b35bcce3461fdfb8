//! Headless demo session: scripted input, no presentation.

use swarm_survivors::game::GameState;
use swarm_survivors::input::InputVector;
use swarm_survivors::presentation::NullPresentation;
use swarm_survivors::session::SessionPhase;

fn main() {
    let mut game = GameState::new(42);
    let mut presentation = NullPresentation;

    // Wander in a slow square so mobs and pickups are actually met
    for tick_index in 0u32..(60 * 300) {
        let input = match (tick_index / 120) % 4 {
            0 => InputVector::new(1, 0),
            1 => InputVector::new(0, 1),
            2 => InputVector::new(-1, 0),
            _ => InputVector::new(0, -1),
        };
        game.tick(input, &mut presentation);

        if game.phase == SessionPhase::LevelPending {
            match game.apply_level_up(&mut presentation) {
                Ok(()) => println!(
                    "[{:6.1}s] reached level {}",
                    game.stats.elapsed_seconds, game.progression.level
                ),
                Err(err) => {
                    eprintln!("level-up failed: {}", err);
                    break;
                }
            }
        }
        if game.phase.is_over() {
            break;
        }
    }

    println!("phase:        {:?}", game.phase);
    println!("level:        {}", game.stats.level);
    println!("mobs killed:  {}", game.stats.mobs_killed);
    println!("elapsed:      {:.1}s", game.stats.elapsed_seconds);
    println!("player hp:    {}", game.player_health());
}
