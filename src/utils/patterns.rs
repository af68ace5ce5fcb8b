use super::parse_rle;
use crate::{Cell, PatternError};

/// Named starting pattern stored in RLE format.
#[derive(Clone, Copy, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub rle: &'static str,
}

impl Pattern {
    pub fn cells(&self) -> Result<Vec<Cell>, PatternError> {
        parse_rle(self.rle)
    }

    pub fn find(name: &str) -> Option<&'static Pattern> {
        PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Block",
        rle: "x = 2, y = 2\n2o$2o!",
    },
    Pattern {
        name: "Blinker",
        rle: "x = 3, y = 1\n3o!",
    },
    Pattern {
        name: "Toad",
        rle: "x = 4, y = 2\nb3o$3o!",
    },
    Pattern {
        name: "Beacon",
        rle: "x = 4, y = 4\n2o$2o$2b2o$2b2o!",
    },
    Pattern {
        name: "Glider",
        rle: "x = 3, y = 3, rule = B3/S23\nbo$2bo$3o!",
    },
    Pattern {
        name: "R-pentomino",
        rle: "x = 3, y = 3\nb2o$2o$bo!",
    },
    Pattern {
        name: "Acorn",
        rle: "x = 7, y = 3\nbo$3bo$2o2b3o!",
    },
    Pattern {
        name: "Gosper glider gun",
        rle: "#N Gosper glider gun\n\
              x = 36, y = 9, rule = B3/S23\n\
              24bo$22bobo$12b2o6b2o12b2o$11bo3bo4b2o12b2o$2o8bo5bo3b2o$2o8bo3bob2o4b\n\
              obo$10bo5bo7bo$11bo3bo$12b2o!",
    },
];
