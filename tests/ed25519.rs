use walletcrypt::ed25519;
use walletcrypt::rng::Csprng;

#[test]
fn test_ed25519_sign_and_verify() {
    let mut rng = Csprng::new();
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);

    let public = ed25519::gen_pub(&seed);
    let message: &[u8] = b"Hello, world!";
    let mut signature = ed25519::sign(&seed, message);

    assert!(
        ed25519::verify(&public, message, &signature),
        "signature should be valid"
    );

    signature[44] ^= 0x10;
    assert!(
        !ed25519::verify(&public, message, &signature),
        "signature modification must be detected"
    );
}

#[test]
fn test_ed25519_add_mul_base_moves_point() {
    let mut rng = Csprng::new();
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);

    let public = ed25519::gen_pub(&seed);

    let mut scalar = [0u8; 32];
    rng.fill_bytes(&mut scalar);

    let moved = ed25519::add_mul_base(&scalar, &public).unwrap();
    assert_ne!(moved, public);
}

#[test]
fn test_ed25519_order_is_stable() {
    let order = ed25519::get_order();
    assert_eq!(order, ed25519::get_order());
    assert_eq!(order[31], 0x10);
}
