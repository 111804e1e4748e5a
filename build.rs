fn env_or(name: &str, default: usize) -> usize {
    println!("cargo:rerun-if-env-changed={}", name);
    match std::env::var(name) {
        Ok(val) => val
            .parse()
            .unwrap_or_else(|_| panic!("{} must be an unsigned integer, got {:?}", name, val)),
        Err(_) => default,
    }
}

fn main() {
    let stack_size = env_or("RPN_STACK_SIZE", 1024);
    let max_input = env_or("RPN_MAX_INPUT", 15);
    let queue_size = env_or("RPN_OUTPUT_QUEUE_SIZE", 64);
    let contents = format!(
        r#"pub const STACK_SIZE: usize = {};
pub const MAX_INPUT: usize = {};
pub const OUTPUT_QUEUE_SIZE: usize = {};"#,
        stack_size, max_input, queue_size,
    );
    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR is not set");
    std::fs::write(std::path::Path::new(&out_dir).join("config.rs"), contents)
        .expect("Failed to write config.rs");
}
