fn main() {
    let structure = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "((..((...))..((...))..))".to_string());
    let json = rnalayout_core::draw_structure(&structure);
    if json.is_empty() {
        eprintln!("invalid structure: {structure}");
        std::process::exit(1);
    }
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    println!("=== STRUCTURE ===");
    println!("{}", v["structure"]);
    println!("\n=== BASES ===");
    let x = v["coords"]["x"].as_array().unwrap();
    let y = v["coords"]["y"].as_array().unwrap();
    for (i, (x, y)) in x.iter().zip(y).enumerate() {
        println!(
            "base[{}]: x={:.4} y={:.4} partner={} rot={}",
            i,
            x.as_f64().unwrap(),
            y.as_f64().unwrap(),
            v["pairs"][i],
            v["rotation"][i]
        );
    }
    println!("\n=== BOUNDS ===");
    println!("{}", v["coords"]["bounds"]);
}
