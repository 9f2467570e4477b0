use std::env;

fn main() {
    // Receiver model fitted to the board (optional)
    // Selects the default protocol generation: max6 uses the three-message
    // NAV-POSLLH/SOL/TIMEUTC fix, max7 and max8 use NAV-PVT.
    let receiver = match env::var("GPS_RECEIVER") {
        Ok(value) => {
            let value = value.trim().to_ascii_lowercase();
            match value.as_str() {
                "max6" | "max7" | "max8" => {
                    println!("cargo:warning=Using GPS_RECEIVER from environment: {}", value);
                    value
                }
                other => {
                    println!(
                        "cargo:warning=Unknown GPS_RECEIVER '{}' (expected max6, max7 or max8), using max8",
                        other
                    );
                    String::from("max8")
                }
            }
        }
        Err(_) => String::from("max8"),
    };
    println!("cargo:rustc-env=GPS_RECEIVER={}", receiver);

    // Rerun if environment variables change
    println!("cargo:rerun-if-env-changed=GPS_RECEIVER");
}
