#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    spendwise_lib::run()
}
