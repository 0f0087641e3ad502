use modelsmith_core::snapshot_schema;

fn main() {
    let schema = snapshot_schema();
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
