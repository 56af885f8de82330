//! Cosmetic choices offered when customising a horse
//!
//! Purely presentational. Nothing in the simulation reads these lists and
//! horses may carry values that are not listed here.

pub const BREEDS: [&str; 15] = [
    "Arabian",
    "Thoroughbred",
    "Quarter Horse",
    "Appaloosa",
    "Paint",
    "Clydesdale",
    "Mustang",
    "Hannoverian",
    "Shetland Pony",
    "Tennessee Walker",
    "Percheron",
    "Friesian",
    "Morgan",
    "Belgian",
    "Draft Horse",
];

pub const COAT_COLOURS: [&str; 15] = [
    "Bay",
    "Chestnut",
    "Black",
    "Grey",
    "Palomino",
    "Roan",
    "Dapple Grey",
    "Buckskin",
    "Liver Chestnut",
    "Cremello",
    "Pinto",
    "Appaloosa",
    "Palomino",
    "White",
    "Sooty",
];

pub const EQUIPMENT: [&str; 15] = [
    "Saddle",
    "Bridle",
    "Racing Silks",
    "None",
    "Horse Boots",
    "Martingale",
    "Breastplate",
    "Girth",
    "Ear Bonnet",
    "Fly Mask",
    "Saddle Pad",
    "Lunge Line",
    "Halters",
    "Blanket",
    "Western Saddle",
];

/// Case-insensitive membership check against one of the lists
pub fn is_listed(options: &[&str], value: &str) -> bool {
    options.iter().any(|o| o.eq_ignore_ascii_case(value))
}
