pub mod player;
pub mod swf;
pub mod utils;

use log::{warn, Level};
use utils::set_panic_hook;
use wasm_bindgen::prelude::*;

use player::{config::PlayerConfig, Player};

/// Browser-facing handle around a loaded movie.
#[wasm_bindgen]
pub struct MoviePlayer {
    player: Player,
}

#[wasm_bindgen]
impl MoviePlayer {
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: &[u8]) -> Result<MoviePlayer, JsValue> {
        let player = Player::load(bytes, PlayerConfig::default())
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(MoviePlayer { player })
    }

    pub fn update(&mut self, dt: f32) {
        self.player.update(dt);
    }

    pub fn goto_and_play(&mut self, frame: u16) {
        self.player.goto_and_play(frame);
    }

    pub fn goto_and_stop(&mut self, frame: u16) {
        self.player.goto_and_stop(frame);
    }

    pub fn play(&mut self) {
        self.player.play();
    }

    pub fn stop(&mut self) {
        self.player.stop();
    }

    pub fn reset(&mut self) {
        self.player.reset();
    }

    pub fn current_frame(&self) -> u16 {
        self.player.current_frame()
    }

    pub fn frame_count(&self) -> u16 {
        self.player.frame_count()
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn stage_width(&self) -> f32 {
        self.player.stage_rect().width()
    }

    pub fn stage_height(&self) -> f32 {
        self.player.stage_rect().height()
    }

    pub fn frame_rate(&self) -> f32 {
        self.player.header().frame_rate
    }

    pub fn set_trace_actions(&self, enabled: bool) {
        self.player.set_trace_actions(enabled);
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    set_panic_hook();
    if console_log::init_with_level(Level::Debug).is_err() {
        warn!("Logger already initialized");
    }
}
