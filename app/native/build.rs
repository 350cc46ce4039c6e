fn main() {
    // SkyLight is a private framework; link path is typically /System/Library/PrivateFrameworks
    // Use framework search mode so the linker can resolve the framework
    if std::env::var("CARGO_CFG_TARGET_OS").is_ok_and(|os| os == "macos") {
        println!("cargo:rustc-link-search=framework=/System/Library/PrivateFrameworks");
        println!("cargo:rustc-link-lib=framework=SkyLight");
    }
}
