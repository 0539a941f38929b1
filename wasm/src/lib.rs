use bingo as bg;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn create_card() -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let card = bg::Card::deal(&bg::DEFAULT_POOL, &mut rand::rng()).map_err(|e| e.to_string())?;
    Ok(card.serialize())
}

#[wasm_bindgen]
pub fn toggle_space(bts: Vec<u8>, id: String) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let mut card = bg::Card::deserialize(&bts);
    let checked = card.toggle(&id).map_err(|e| e.to_string())?;
    let mut xs = card.serialize();
    xs.push(if checked { 1 } else { 0 });
    Ok(xs)
}

#[wasm_bindgen]
pub fn reset_card(bts: Vec<u8>) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let mut card = bg::Card::deserialize(&bts);
    card.reset(&bg::DEFAULT_POOL, &mut rand::rng())
        .map_err(|e| e.to_string())?;
    Ok(card.serialize())
}

#[wasm_bindgen]
pub fn has_won(bts: Vec<u8>) -> bool {
    console_error_panic_hook::set_once();

    let card = bg::Card::deserialize(&bts);
    card.has_won()
}

#[wasm_bindgen]
pub fn get_ids(bts: Vec<u8>) -> Vec<String> {
    console_error_panic_hook::set_once();

    let card = bg::Card::deserialize(&bts);
    card.spaces.into_iter().map(|space| space.id).collect()
}

#[wasm_bindgen]
pub fn get_labels(bts: Vec<u8>) -> Vec<String> {
    console_error_panic_hook::set_once();

    let card = bg::Card::deserialize(&bts);
    card.spaces.into_iter().map(|space| space.label).collect()
}

#[wasm_bindgen]
pub fn get_checked(bts: Vec<u8>) -> Vec<u8> {
    console_error_panic_hook::set_once();

    let card = bg::Card::deserialize(&bts);
    card.spaces
        .into_iter()
        .map(|space| if space.checked { 1 } else { 0 })
        .collect()
}
