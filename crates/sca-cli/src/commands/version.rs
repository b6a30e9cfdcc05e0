const LICENSE: &str = include_str!("../../LICENSE");

pub fn handle() {
    println!("sca-cli version {}", env!("CARGO_PKG_VERSION"));
}

pub fn license() {
    println!("{}", LICENSE.trim_end());
}
