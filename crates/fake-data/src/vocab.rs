//! Small pt-BR vocabularies backing the person, contact and filler generators

use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Ana", "Beatriz", "Bruno", "Camila", "Carlos", "Daniela", "Eduardo", "Fernanda",
    "Gabriel", "Helena", "Igor", "Júlia", "João", "Larissa", "Lucas", "Marcos",
    "Mariana", "Natália", "Otávio", "Paulo", "Rafael", "Sofia", "Thiago", "Vitória",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Araújo", "Barbosa", "Cardoso", "Carvalho", "Costa", "Ferreira", "Gomes",
    "Lima", "Martins", "Melo", "Oliveira", "Pereira", "Ribeiro", "Rocha", "Santos",
    "Silva", "Souza", "Teixeira",
];

const EMAIL_DOMAINS: &[&str] = &["gmail.com", "hotmail.com", "yahoo.com.br", "live.com", "bol.com.br"];

const AREA_CODES: &[u8] = &[11, 19, 21, 27, 31, 41, 47, 48, 51, 61, 62, 71, 81, 85, 91];

const WORDS: &[&str] = &[
    "alias", "consequatur", "aut", "perferendis", "sit", "voluptatem", "accusantium",
    "doloremque", "aperiam", "eaque", "ipsa", "quae", "ab", "illo", "inventore", "veritatis",
    "quasi", "architecto", "beatae", "vitae", "dicta", "sunt", "explicabo",
];

const DEPARTMENTS: &[&str] = &[
    "Automotivo", "Beleza", "Brinquedos", "Casa", "Computadores", "Eletrônicos", "Esportes",
    "Ferramentas", "Jardim", "Livros", "Música", "Roupas", "Saúde",
];

const PRODUCTS: &[&str] = &[
    "Bicicleta", "Cadeira", "Camiseta", "Carteira", "Chapéu", "Computador", "Luvas",
    "Mesa", "Mouse", "Sapatos", "Teclado", "Toalhas",
];

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

/// A random "First Last" person name
pub fn full_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

/// A random lower-case ASCII email address
pub fn email<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = fold_ascii(pick(rng, FIRST_NAMES));
    let last = fold_ascii(pick(rng, LAST_NAMES));
    let domain = pick(rng, EMAIL_DOMAINS);
    format!("{}.{}{}@{}", first, last, rng.gen_range(1..100), domain)
}

/// A random mobile number, e.g. `(11) 98765-4321`
pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    let area = AREA_CODES.choose(rng).copied().unwrap_or(11);
    format!(
        "({}) 9{:04}-{:04}",
        area,
        rng.gen_range(0..10_000),
        rng.gen_range(0..10_000)
    )
}

/// A random single filler word
pub fn word<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, WORDS).to_string()
}

/// A random store department name
pub fn department<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, DEPARTMENTS).to_string()
}

/// A random product name
pub fn product<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, PRODUCTS).to_string()
}

/// A licence plate: three upper-case letters, a dash, four digits
pub fn car_plate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let letters: String = (0..3)
        .map(|_| char::from(UPPERCASE[rng.gen_range(0..UPPERCASE.len())]))
        .collect();
    let digits: String = (0..4)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    format!("{}-{}", letters, digits)
}

/// Strip the Portuguese diacritics used in the name lists and lower-case
fn fold_ascii(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            'á' | 'ã' | 'â' | 'à' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_car_plate_shape() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100 {
            let plate = car_plate(&mut rng);
            let (letters, digits) = plate.split_once('-').unwrap();
            assert_eq!(letters.len(), 3);
            assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
            assert_eq!(digits.len(), 4);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_email_is_ascii() {
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..100 {
            let address = email(&mut rng);
            assert!(address.is_ascii(), "{}", address);
            assert_eq!(address.matches('@').count(), 1);
        }
    }

    #[test]
    fn test_full_name_has_two_parts() {
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(full_name(&mut rng).split(' ').count(), 2);
    }

    #[test]
    fn test_phone_shape() {
        let mut rng = SmallRng::seed_from_u64(4);
        let number = phone(&mut rng);
        assert!(number.starts_with('('));
        assert_eq!(number.len(), "(11) 98765-4321".len());
    }
}
