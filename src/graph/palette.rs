//! Display colors per part-of-speech tag

use crate::token::Upos;

/// One visually distinct color per tag, indexed by [`Upos::index`]
pub const UPOS_PALETTE: [&str; 17] = [
    "#1f77b4", // ADJ
    "#aec7e8", // ADP
    "#ff7f0e", // ADV
    "#ffbb78", // AUX
    "#2ca02c", // CCONJ
    "#98df8a", // DET
    "#d62728", // INTJ
    "#ff9896", // NOUN
    "#9467bd", // NUM
    "#c5b0d5", // PART
    "#8c564b", // PRON
    "#c49c94", // PROPN
    "#e377c2", // PUNCT
    "#f7b6d2", // SCONJ
    "#7f7f7f", // SYM
    "#bcbd22", // VERB
    "#17becf", // X
];

/// Color assigned to a tag
pub fn color_for(upos: Upos) -> &'static str {
    UPOS_PALETTE[upos.index()]
}
