use derby_core::Horse;

/// First horse whose name matches, ignoring case
pub fn find_horse<'a, I>(horses: I, name: &str) -> Option<&'a Horse>
where
    I: IntoIterator<Item = &'a Horse>,
{
    let wanted = name.trim().to_lowercase();
    horses
        .into_iter()
        .find(|horse| horse.name().to_lowercase() == wanted)
}
