//! Built-in Bursa Malaysia company directory.
//!
//! Resolves display names without a network call and backs the offline
//! symbol search. Order matters: search results follow the table order.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::models::DirectoryEntry;

/// Known Bursa counters, grouped by sector.
pub const BURSA_DIRECTORY: &[(&str, &str)] = &[
    // Banks
    ("1155.KL", "Maybank (马来亚银行)"),
    ("1066.KL", "CIMB (联昌银行)"),
    ("5234.KL", "Public Bank (大众银行)"),
    ("1295.KL", "AmBank (大马银行)"),
    ("6888.KL", "RHB Bank (兴业银行)"),
    ("2488.KL", "Hong Leong Bank (丰隆银行)"),
    // Utilities and telecoms
    ("5347.KL", "Tenaga Nasional (国家能源)"),
    ("6947.KL", "Telekom Malaysia (马电讯)"),
    ("6742.KL", "Maxis (明讯)"),
    ("5398.KL", "CelcomDigi"),
    ("6793.KL", "Gas Malaysia (马天然气)"),
    // Oil and gas
    ("5181.KL", "Petronas Gas (国油气体)"),
    ("5681.KL", "Petronas Dagangan (国油贸易)"),
    ("4481.KL", "MRCB"),
    ("5227.KL", "Petronas Chemicals (国油化学)"),
    // Plantations
    ("4545.KL", "IOI Corporation (IOI集团)"),
    ("5285.KL", "KLK (吉隆坡甲洞)"),
    ("5027.KL", "Sime Darby Plantation (森那美种植)"),
    ("1961.KL", "Hap Seng Plantations"),
    ("2525.KL", "Boustead Plantation"),
    // Consumer
    ("4707.KL", "Nestle (雀巢)"),
    ("1817.KL", "F&N (花莎尼)"),
    ("5099.KL", "Genting (云顶)"),
    ("4715.KL", "Genting Malaysia (云顶大马)"),
    ("5348.KL", "QL Resources"),
    ("7081.KL", "Hup Seng Industries"),
    ("2828.KL", "Power Root"),
    // Technology
    ("7113.KL", "Inari Amertron"),
    ("7089.KL", "Unisem (友尼森)"),
    ("7204.KL", "Vitrox (伟特)"),
    ("0166.KL", "Notion VTec"),
    ("7277.KL", "Globetronics Technology"),
    ("5284.KL", "Penta Ocean"),
    // Construction
    ("3239.KL", "Gamuda (金务大)"),
    ("5819.KL", "Hong Leong Industries"),
    ("6801.KL", "IJM Corporation"),
    ("5081.KL", "Sunway Construction"),
    // Property
    ("5223.KL", "SP Setia (实达集团)"),
    ("5168.KL", "UMW Holdings"),
    ("1783.KL", "Top Glove (顶级手套)"),
    ("7106.KL", "Hartalega"),
    // Other
    ("5216.KL", "IHH Healthcare (IHH医疗保健)"),
    ("6012.KL", "Maxis"),
    ("5274.KL", "MISC (马国际船务)"),
    ("5288.KL", "Hong Leong Financial Group"),
    ("1082.KL", "Malayan Flour Mills"),
];

lazy_static! {
    static ref NAME_INDEX: HashMap<&'static str, &'static str> =
        BURSA_DIRECTORY.iter().copied().collect();
}

/// Display name for an already-normalized symbol (e.g., "5347.KL").
pub fn lookup_name(symbol: &str) -> Option<&'static str> {
    NAME_INDEX.get(symbol).copied()
}

/// Case-insensitive substring search over code and name, in table order.
///
/// Stops as soon as `limit` matches are collected. The limit is checked
/// before a match is kept, so `limit == 0` returns nothing even when the
/// query matches, the same as the persisted markets.
pub fn search_directory(query: &str, limit: usize) -> Vec<DirectoryEntry> {
    let needle = query.to_lowercase();

    BURSA_DIRECTORY
        .iter()
        .filter(|(symbol, name)| {
            symbol.to_lowercase().contains(&needle) || name.to_lowercase().contains(&needle)
        })
        .take(limit)
        .map(|(symbol, name)| DirectoryEntry::new(*symbol, *name))
        .collect()
}
