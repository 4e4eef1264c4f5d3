mod a11y;
mod announce;
mod boot;
mod dom;
mod forms;
mod layout;
mod replies;
mod storage;
mod threads;
mod votes;

lazy_static::lazy_static! {
    pub static ref CLIENT: reqwest::Client = reqwest::Client::new();
}

fn main() {
    tracing_wasm::set_as_global_default();
    boot::init_on_ready();
}
