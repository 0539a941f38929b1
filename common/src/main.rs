use bingo::*;
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    // --- 1. Initialization ---
    let mut rng = rand::rng();
    let mut card = Card::deal(&DEFAULT_POOL, &mut rng)?;

    card.subscribe(|event| {
        if let CardEvent::SpaceChanged { id, checked } = event {
            let action = if *checked { "daubed" } else { "cleared" };
            println!("  [card] {} {}", action, id);
        }
    });

    println!("--- Autonomous Bingo Night ---");
    println!("The caller draws the whole pool in random order; the player daubs every match.");
    println!("Opening card:");
    print_card(&card);
    thread::sleep(Duration::from_secs(2));

    // --- 2. Call Loop ---
    let mut calls = DEFAULT_POOL.to_vec();
    shuffle(&mut calls, &mut rng);

    let mut call_count = 0;
    let mut won = false;
    for label in calls {
        call_count += 1;
        // Calls are announced by id, the way a space would be looked up.
        let id = label.replace('\u{ad}', "");
        println!("\n--- Call #{}: {} ---", call_count, id);

        // --- 3. Daub the Space, If Present ---
        match card.toggle(&id) {
            Ok(_) => print_card(&card),
            Err(CardError::InvalidToggleTarget(_)) => println!("  Not on this card."),
            Err(e) => return Err(e.into()),
        }

        // --- 4. Check for a Win ---
        if card.has_won() {
            won = true;
            println!("\nBINGO after {} calls!", call_count);
            break;
        }

        // Add a delay to make the game watchable
        thread::sleep(Duration::from_millis(500));
    }

    // --- 5. Final Result ---
    println!("\n--- Game Over ---");

    if won {
        println!("Result: The player completed a line.");
    } else {
        println!("Result: The pool ran dry without a bingo.");
    }

    Ok(())
}

fn print_card(card: &Card) {
    for row in card.spaces.chunks(CARDS_WIDE) {
        for space in row {
            let mark = if space.checked { '*' } else { ' ' };
            print!("[{}{:<12.12}]", mark, space.id);
        }
        println!();
    }
}
