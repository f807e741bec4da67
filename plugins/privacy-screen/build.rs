fn main() {
    tauri_plugin::Builder::new(&["enable", "disable", "set_enabled", "status"]).build();
}
