//! Forsyth-Edwards Notation parsing and serialization.

use super::fen_tables::{CHAR_TO_PC, PC_TO_CHAR};
use super::{CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Board, Color, Piece};
use crate::square::Square;

impl Board {
    /// Overwrites `self` with the position described by `fen`. Accepts either
    /// the full six-field FEN or just the placement/side/castling/en-passant
    /// fields, defaulting halfmove clock to 0 and fullmove number to 1.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), String> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(format!("FEN has too few fields: '{}'", fen));
        }

        let mut masks = [[0u64; 6]; 2];
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(format!(
                "FEN placement must have 8 ranks, found {}: '{}'",
                ranks.len(),
                fields[0]
            ));
        }

        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top as u8;
            let mut file: u8 = 0;
            for ch in rank_str.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as u8;
                } else {
                    if file >= 8 {
                        return Err(format!("rank '{}' overflows the board", rank_str));
                    }
                    let (piece, color) = CHAR_TO_PC[ch as usize]
                        .ok_or_else(|| format!("unrecognized FEN piece glyph '{}'", ch))?;
                    let sq = Square::from_file_rank(file, rank);
                    masks[color as usize][piece as usize] |= 1u64 << sq.index();
                    file += 1;
                }
            }
            if file != 8 {
                return Err(format!("rank '{}' does not cover 8 files", rank_str));
            }
        }

        *self = Board::new_empty();
        for &color in &[Color::White, Color::Black] {
            for &piece in &[
                Piece::Pawn,
                Piece::Knight,
                Piece::Bishop,
                Piece::Rook,
                Piece::Queen,
                Piece::King,
            ] {
                self.set_bb(color, piece, masks[color as usize][piece as usize]);
            }
        }

        self.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(format!("invalid side to move '{}'", other)),
        };

        self.castling_rights = 0;
        if fields[2] != "-" {
            for ch in fields[2].chars() {
                self.castling_rights |= match ch {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    other => return Err(format!("invalid castling glyph '{}'", other)),
                };
            }
        }

        self.en_passant = if fields[3] == "-" {
            None
        } else {
            Some(parse_square(fields[3])?)
        };

        self.halfmove_clock = fields.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);
        self.fullmove_number = fields.get(5).and_then(|s| s.parse().ok()).unwrap_or(1);

        self.history.clear();
        self.refresh_zobrist();
        Ok(())
    }

    /// Serializes the current position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank_from_top in 0..8 {
            let rank = 7 - rank_from_top;
            let mut empty_run = 0;
            for file in 0..8 {
                let sq = Square::from_file_rank(file, rank);
                match self.piece_at(sq) {
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            placement.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        let idx = (color as usize) * 6 + (piece as usize);
                        placement.push(PC_TO_CHAR[idx]);
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if rank_from_top != 7 {
                placement.push('/');
            }
        }

        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castling = String::new();
        if self.castling_rights & CASTLE_WK != 0 {
            castling.push('K');
        }
        if self.castling_rights & CASTLE_WQ != 0 {
            castling.push('Q');
        }
        if self.castling_rights & CASTLE_BK != 0 {
            castling.push('k');
        }
        if self.castling_rights & CASTLE_BQ != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = match self.en_passant {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            placement, side, castling, en_passant, self.halfmove_clock, self.fullmove_number
        )
    }
}

fn parse_square(s: &str) -> Result<Square, String> {
    let mut chars = s.chars();
    let file_ch = chars.next().ok_or_else(|| format!("empty square '{}'", s))?;
    let rank_ch = chars
        .next()
        .ok_or_else(|| format!("square '{}' missing rank", s))?;
    if chars.next().is_some() {
        return Err(format!("square '{}' has trailing characters", s));
    }

    if !('a'..='h').contains(&file_ch) || !('1'..='8').contains(&rank_ch) {
        return Err(format!("square '{}' out of range", s));
    }

    let file = file_ch as u8 - b'a';
    let rank = rank_ch as u8 - b'1';
    Ok(Square::from_file_rank(file, rank))
}
