use std::collections::HashSet;
use std::sync::OnceLock;

use p2p_keys::{
    generate_key_pair, marshal_private_key, marshal_public_key, unmarshal_private_key,
    unmarshal_public_key, Key, KeyConfig, KeyError, KeyFactory, KeyPair, KeyType, PrivKey,
    PubKey,
};
use proptest::prelude::*;
use rand::rngs::OsRng;
use rand::RngCore;

fn factory() -> &'static KeyFactory {
    static FACTORY: OnceLock<KeyFactory> = OnceLock::new();
    FACTORY.get_or_init(|| {
        KeyFactory::new(KeyConfig {
            default_rsa_bits: 1024,
            min_rsa_bits: 1024,
            max_rsa_bits: 4096,
        })
        .expect("factory")
    })
}

/// One pair per algorithm, shared across tests to keep RSA generation cheap.
fn pairs() -> &'static [KeyPair] {
    static PAIRS: OnceLock<Vec<KeyPair>> = OnceLock::new();
    PAIRS.get_or_init(|| {
        KeyType::ALL
            .into_iter()
            .map(|key_type| factory().generate(key_type, 0).expect("key pair"))
            .collect()
    })
}

#[test]
fn ecdsa_libp2p_scenario() {
    let pair = generate_key_pair(KeyType::Ecdsa, 0).expect("ecdsa pair");
    let signature = pair.private.sign(b"libp2p").expect("signature");
    assert!(pair.public.verify(b"libp2p", &signature).expect("verify"));

    let marshalled = marshal_private_key(&pair.private).expect("marshal");
    let private = unmarshal_private_key(&marshalled).expect("unmarshal");
    let derived = private.public_key();

    assert_eq!(
        derived.raw().expect("derived raw"),
        pair.public.raw().expect("public raw")
    );
}

#[test]
fn unsupported_tag_is_rejected() {
    let result = factory().generate_from_tag(42, 0);
    assert!(matches!(result, Err(KeyError::UnsupportedKeyType(_))));
}

#[test]
fn marshalled_keys_round_trip() {
    for pair in pairs() {
        let private = factory()
            .unmarshal_private_key(&marshal_private_key(&pair.private).expect("marshal"))
            .expect("unmarshal private");
        let public = factory()
            .unmarshal_public_key(&marshal_public_key(&pair.public).expect("marshal"))
            .expect("unmarshal public");

        assert_eq!(private, pair.private, "{}", pair.key_type());
        assert_eq!(public, pair.public, "{}", pair.key_type());
    }
}

#[test]
fn derived_public_key_is_stable() {
    for pair in pairs() {
        let first = pair.private.public_key();
        let second = pair.private.public_key();

        assert_eq!(first.raw().expect("raw"), pair.public.raw().expect("raw"));
        assert_eq!(first.raw().expect("raw"), second.raw().expect("raw"));
        assert_eq!(first.key_type(), pair.private.key_type());
    }
}

#[test]
fn raw_is_deterministic() {
    for pair in pairs() {
        assert_eq!(pair.private.raw(), pair.private.raw());
        assert_eq!(pair.public.raw(), pair.public.raw());
    }
}

#[test]
fn signatures_do_not_cross_algorithms() {
    let data = b"cross algorithm";
    for signer in pairs() {
        let signature = signer.private.sign(data).expect("sign");
        for verifier in pairs() {
            if verifier.key_type() == signer.key_type() {
                continue;
            }
            let result = verifier.public.verify(data, &signature);
            assert!(
                !matches!(result, Ok(true)),
                "{} signature accepted by {} key",
                signer.key_type(),
                verifier.key_type()
            );
        }
    }
}

#[test]
fn signatures_do_not_cross_keys() {
    let other = factory()
        .generate(KeyType::Ed25519, 0)
        .expect("second ed25519 pair");
    let pair = pairs()
        .iter()
        .find(|pair| pair.key_type() == KeyType::Ed25519)
        .expect("ed25519 pair");

    let signature = pair.private.sign(b"data").expect("sign");
    assert_eq!(other.public.verify(b"data", &signature), Ok(false));
}

#[test]
fn keys_of_different_types_are_not_equal() {
    let ecdsa = &pairs()[KeyType::Ecdsa as usize];
    let secp = &pairs()[KeyType::Secp256k1 as usize];

    assert_ne!(ecdsa.public, secp.public);
    assert!(!ecdsa.public.equals(&secp.public));
    assert!(ecdsa.public.equals(&ecdsa.private.public_key()));
}

#[test]
fn equal_keys_collapse_in_a_set() {
    let mut private = HashSet::new();
    let mut public = HashSet::new();
    for pair in pairs() {
        let rebuilt = factory()
            .unmarshal_private_key(&marshal_private_key(&pair.private).expect("marshal"))
            .expect("unmarshal");

        assert!(private.insert(pair.private.clone()));
        assert!(!private.insert(rebuilt.clone()));
        assert!(public.insert(pair.public.clone()));
        assert!(!public.insert(rebuilt.public_key()));
    }

    assert_eq!(private.len(), KeyType::ALL.len());
    assert_eq!(public.len(), KeyType::ALL.len());
    assert!(public.contains(&pairs()[KeyType::Secp256k1 as usize].private.public_key()));
}

#[test]
fn truncated_records_are_key_format() {
    for pair in pairs() {
        let private = marshal_private_key(&pair.private).expect("marshal");
        let public = marshal_public_key(&pair.public).expect("marshal");

        for cut in [private.len() / 2, private.len() - 1] {
            let result = factory().unmarshal_private_key(&private[..cut]);
            assert!(
                matches!(result, Err(KeyError::KeyFormat(_))),
                "{} private cut at {cut}: {result:?}",
                pair.key_type()
            );
        }

        for cut in [public.len() / 2, public.len() - 1] {
            let result = factory().unmarshal_public_key(&public[..cut]);
            assert!(
                matches!(result, Err(KeyError::KeyFormat(_))),
                "{} public cut at {cut}: {result:?}",
                pair.key_type()
            );
        }
    }
}

#[test]
fn random_bytes_never_yield_a_key() {
    let mut garbage = [0u8; 48];
    OsRng.fill_bytes(&mut garbage);

    for key_type in KeyType::ALL {
        assert!(factory().private_key_from_raw(key_type, &garbage).is_err());
        assert!(factory().public_key_from_raw(key_type, &garbage).is_err());
    }
}

#[test]
fn default_factory_requires_2048_bit_rsa() {
    let pair = &pairs()[KeyType::Rsa as usize];
    let marshalled = marshal_public_key(&pair.public).expect("marshal");

    assert!(matches!(
        unmarshal_public_key(&marshalled),
        Err(KeyError::InvalidKeySize { bits: 1024, .. })
    ));
    assert!(matches!(
        generate_key_pair(KeyType::Rsa, 1024),
        Err(KeyError::InvalidKeySize { .. })
    ));
}

#[test]
fn rebuilt_pair_matches() {
    for pair in pairs() {
        let rebuilt = KeyPair::from_private(pair.private.clone());
        assert_eq!(&rebuilt, pair);
    }
}

#[test]
fn debug_output_hides_secrets() {
    for pair in pairs() {
        let rendered = format!("{:?}", pair.private);
        assert_eq!(rendered, format!("PrivateKey({:?})", pair.key_type()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn sign_then_verify(data in any::<Vec<u8>>()) {
        for pair in pairs() {
            let signature = pair.private.sign(&data).expect("sign");
            prop_assert!(pair.public.verify(&data, &signature).expect("verify"));
        }
    }

    #[test]
    fn flipped_data_bit_fails(data in prop::collection::vec(any::<u8>(), 1..256), bit in any::<prop::sample::Index>()) {
        for pair in pairs() {
            let signature = pair.private.sign(&data).expect("sign");
            let mut tampered = data.clone();
            let position = bit.index(tampered.len() * 8);
            tampered[position / 8] ^= 1 << (position % 8);

            prop_assert!(!pair.public.verify(&tampered, &signature).expect("verify"));
        }
    }

    #[test]
    fn flipped_signature_bit_fails(data in any::<Vec<u8>>(), bit in any::<prop::sample::Index>()) {
        for pair in pairs() {
            let mut signature = pair.private.sign(&data).expect("sign");
            let position = bit.index(signature.len() * 8);
            signature[position / 8] ^= 1 << (position % 8);

            // A flipped DER header may no longer parse; that is still a rejection.
            let result = pair.public.verify(&data, &signature);
            prop_assert!(!matches!(result, Ok(true)));
        }
    }
}
