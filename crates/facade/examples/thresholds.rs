use dpsu::{PrivacyParams, ReleaseThresholds};

fn main() {
    for eps in [0.5, 1.0, 2.0, 4.0] {
        let params = PrivacyParams::new(eps).expect("valid params");
        let t = ReleaseThresholds::derive(&params).expect("thresholds");
        println!(
            "eps={eps:>4}: lambda={:.4} rho={:.4} gamma={:.4}",
            t.lambda, t.rho, t.gamma
        );
    }
}
