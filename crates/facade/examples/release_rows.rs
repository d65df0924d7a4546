use dpsu::{retain_released, set_union_of_rows, LaplaceNoise, PrivacyParams};

fn main() {
    // Synthetic activity table: one row per (user, event) observation.
    let mut rows: Vec<(u32, &str)> = Vec::new();
    for user in 0..500u32 {
        rows.push((user, "search"));
        rows.push((user, "checkout"));
        if user % 5 == 0 {
            rows.push((user, "refund"));
        }
        if user == 42 {
            rows.push((user, "debug-menu"));
        }
    }

    let params = PrivacyParams::new(1.0).expect("valid params");
    let mut rng = rand::thread_rng();
    let mut noise = LaplaceNoise::new(rand::thread_rng());

    let released =
        set_union_of_rows(rows.clone(), &params, &mut rng, &mut noise).expect("release");
    println!("released items: {:?}", released);

    // Common events survive; the single user's "debug-menu" never does.
    let disclosed = retain_released(rows, &released);
    println!("disclosed rows: {}", disclosed.len());
}
