// Trunk entrypoint: runs the page behaviors when the module is instantiated.

fn main() {}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    flotte_web::start();
}
