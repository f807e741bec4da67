fn main() {
    tauri_plugin::Builder::new(&["status"]).build();
}
