//! Brazilian national ID generators (CPF and CNPJ) with valid check digits

use rand::Rng;

/// Number of digits in a CPF
pub const CPF_LEN: usize = 11;

/// Number of digits in a CNPJ
pub const CNPJ_LEN: usize = 14;

/// Weights for the first CNPJ check digit
pub const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weights for the second CNPJ check digit
pub const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Compute a CPF check digit over `digits`.
///
/// Weights run from `digits.len() + 1` down to 2, so nine digits yield the
/// tenth digit and ten digits yield the eleventh.
pub fn cpf_check_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (top - i as u32))
        .sum();

    let remainder = (sum * 10) % 11;
    if remainder == 10 {
        0
    } else {
        remainder as u8
    }
}

/// Compute a CNPJ check digit over the leading digits covered by `weights`.
pub fn cnpj_check_digit(digits: &[u8], weights: &[u32]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(&d, &w)| u32::from(d) * w)
        .sum();

    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        (11 - remainder) as u8
    }
}

/// Generate a checksum-valid 11-digit CPF (digits only, no punctuation)
pub fn cpf<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut digits = [0u8; CPF_LEN];
    for d in digits.iter_mut().take(9) {
        *d = rng.gen_range(0..=9);
    }
    digits[9] = cpf_check_digit(&digits[..9]);
    digits[10] = cpf_check_digit(&digits[..10]);

    render(&digits)
}

/// Generate a checksum-valid 14-digit CNPJ (digits only, no punctuation)
pub fn cnpj<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut digits = [0u8; CNPJ_LEN];
    for d in digits.iter_mut().take(12) {
        *d = rng.gen_range(0..=9);
    }
    digits[12] = cnpj_check_digit(&digits[..12], &CNPJ_FIRST_WEIGHTS);
    digits[13] = cnpj_check_digit(&digits[..13], &CNPJ_SECOND_WEIGHTS);

    render(&digits)
}

/// Check that `value` is 11 digits whose last two match the CPF algorithm
pub fn is_valid_cpf(value: &str) -> bool {
    match parse_digits(value, CPF_LEN) {
        Some(d) => d[9] == cpf_check_digit(&d[..9]) && d[10] == cpf_check_digit(&d[..10]),
        None => false,
    }
}

/// Check that `value` is 14 digits whose last two match the CNPJ algorithm
pub fn is_valid_cnpj(value: &str) -> bool {
    match parse_digits(value, CNPJ_LEN) {
        Some(d) => {
            d[12] == cnpj_check_digit(&d[..12], &CNPJ_FIRST_WEIGHTS)
                && d[13] == cnpj_check_digit(&d[..13], &CNPJ_SECOND_WEIGHTS)
        }
        None => false,
    }
}

fn parse_digits(value: &str, len: usize) -> Option<Vec<u8>> {
    if value.len() != len {
        return None;
    }
    value
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect()
}

fn render(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}
