use rand::Rng;
use rand::distributions::Alphanumeric;

// --- Helper Functions ---

// random_token
pub fn random_token<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// `+magnitude` or `-magnitude` with equal probability.
pub fn random_sign<R: Rng + ?Sized>(rng: &mut R, magnitude: f32) -> f32 {
    if rng.gen_bool(0.5) { magnitude } else { -magnitude }
}
