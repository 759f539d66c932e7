//! Fixed USI response lines: engine identity and the handshake/end-of-search
//! acknowledgements.

pub const ENGINE_NAME: &str = "shogi_engine";
pub const ENGINE_AUTHOR: &str = "shogi_engine contributors";

pub fn print_id_and_options() {
    println!("id name {ENGINE_NAME}");
    println!("id author {ENGINE_AUTHOR}");
    super::options::print_options();
    println!("usiok");
}

pub fn print_ready_ok() {
    println!("readyok");
}

pub fn print_checkmate_not_implemented() {
    println!("checkmate notimplemented");
}
