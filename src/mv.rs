/*
 * Caissa, a chess problem solver
 * Copyright (C) 2026 The Caissa Authors
 *
 * Caissa is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * Caissa is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Caissa. If not, see <https://www.gnu.org/licenses/>.
 */

//! A single tagged [`Move`] type replacing the per-fairy-condition class
//! hierarchy: every base move kind optionally carries an [`Effect`]
//! describing the Circe/AntiCirce rebirth and/or Andernach/AntiAndernach
//! colour flip a fairy condition attached to it at generation time.

use crate::{lang::Locale, position::Position, square::Square};

/// Which side of a capture a rebirth relocates: the piece removed from the
/// board (Circe) or the piece that just moved (AntiCirce).
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum RebirthSubject {
    Captured,
    Capturer,
}

/// Where a rebirthed piece lands, and whether it arrives eligible to
/// castle. Computed once at move-construction time so every later
/// apply/revert is order-independent.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Arrival {
    pub subject: RebirthSubject,
    pub square: Square,
    pub castling_eligible: bool,
}

/// The fairy-condition payload a base move may carry.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct Effect {
    /// Circe/AntiCirce rebirth, when the condition applied.
    pub rebirth: Option<Arrival>,
    /// Whether the piece ending on the move's own target square (not a
    /// rebirth square) flips colour on arrival (Andernach/AntiAndernach).
    pub flip: bool,
    /// Whether the flipped piece remains castling-eligible on the square it
    /// ends up on. Only consulted when `flip` is set and `rebirth` is
    /// `None` (a rebirth's eligibility lives on [`Arrival::castling_eligible`]
    /// instead).
    pub flip_castling_eligible: bool,
}

impl Effect {
    /// No fairy effect at all: a plain move under the default condition.
    pub const NONE: Self = Self {
        rebirth: None,
        flip: false,
        flip_castling_eligible: false,
    };
}

/// A chess move, orthodox or fairy-conditioned.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Move {
    Quiet {
        origin: Square,
        target: Square,
        effect: Effect,
    },
    Capture {
        origin: Square,
        target: Square,
        effect: Effect,
    },
    DoubleStep {
        origin: Square,
        target: Square,
        stop: Square,
        effect: Effect,
    },
    EnPassant {
        origin: Square,
        target: Square,
        stop: Square,
        effect: Effect,
    },
    LongCastling {
        origin: Square,
        target: Square,
        origin2: Square,
        target2: Square,
    },
    ShortCastling {
        origin: Square,
        target: Square,
        origin2: Square,
        target2: Square,
    },
    Promotion {
        origin: Square,
        target: Square,
        black: bool,
        order: u8,
        effect: Effect,
    },
    PromotionCapture {
        origin: Square,
        target: Square,
        black: bool,
        order: u8,
        effect: Effect,
    },
    Null,
}

impl Move {
    /// Flips the colour of whatever piece occupies `square`. No-op if the
    /// square is empty (shouldn't happen for a well-formed effect).
    fn flip_colour(position: &mut Position, square: Square) {
        if let Some(mut piece) = position.board.at(square) {
            piece.black = !piece.black;
            position.board.set(square, Some(piece));
        }
    }

    /// Moves a piece (plus any fairy effect) during `apply`; mirrors the
    /// C++ `updatePieces` family for the capture-bearing move kinds.
    fn apply_capture_like(
        position: &mut Position,
        origin: Square,
        target: Square,
        effect: Effect,
    ) {
        let captured = position.board.set(target, None);
        position.captures.push(captured.expect("capture onto an empty square"));
        match effect.rebirth {
            Some(Arrival {
                subject: RebirthSubject::Captured,
                square,
                ..
            }) => {
                let mover = position.board.set(origin, None);
                position.board.set(target, mover);
                let reborn = position.captures.pop();
                position.board.set(square, reborn);
                if effect.flip {
                    Self::flip_colour(position, target);
                }
            }
            Some(Arrival {
                subject: RebirthSubject::Capturer,
                square,
                ..
            }) => {
                let mover = position.board.set(origin, None);
                position.board.set(square, mover);
                if effect.flip {
                    Self::flip_colour(position, square);
                }
            }
            None => {
                let mover = position.board.set(origin, None);
                position.board.set(target, mover);
                if effect.flip {
                    Self::flip_colour(position, target);
                }
            }
        }
    }

    fn revert_capture_like(
        position: &mut Position,
        origin: Square,
        target: Square,
        effect: Effect,
    ) {
        match effect.rebirth {
            Some(Arrival {
                subject: RebirthSubject::Captured,
                square,
                ..
            }) => {
                if effect.flip {
                    Self::flip_colour(position, target);
                }
                let reborn = position.board.set(square, None);
                position.captures.push(reborn.expect("missing reborn piece on unmake"));
                let mover = position.board.set(target, None);
                position.board.set(origin, mover);
            }
            Some(Arrival {
                subject: RebirthSubject::Capturer,
                square,
                ..
            }) => {
                if effect.flip {
                    Self::flip_colour(position, square);
                }
                let mover = position.board.set(square, None);
                position.board.set(origin, mover);
            }
            None => {
                if effect.flip {
                    Self::flip_colour(position, target);
                }
                let mover = position.board.set(target, None);
                position.board.set(origin, mover);
            }
        }
        let captured = position.captures.pop();
        position.board.set(target, captured);
    }

    /// `updatePieces`: shuffles board/box/table state forward.
    fn update_pieces(self, position: &mut Position) {
        match self {
            Self::Quiet { origin, target, effect } => {
                let mover = position.board.set(origin, None);
                position.board.set(target, mover);
                if effect.flip {
                    Self::flip_colour(position, target);
                }
            }
            Self::Capture { origin, target, effect } => {
                Self::apply_capture_like(position, origin, target, effect);
            }
            Self::DoubleStep { origin, target, effect, .. } => {
                let mover = position.board.set(origin, None);
                position.board.set(target, mover);
                if effect.flip {
                    Self::flip_colour(position, target);
                }
            }
            Self::EnPassant {
                origin,
                target,
                stop,
                effect,
            } => {
                let captured = position.board.set(stop, None);
                position.captures.push(captured.expect("en passant onto an empty stop square"));
                match effect.rebirth {
                    Some(Arrival {
                        subject: RebirthSubject::Captured,
                        square,
                        ..
                    }) => {
                        let mover = position.board.set(origin, None);
                        position.board.set(target, mover);
                        let reborn = position.captures.pop();
                        position.board.set(square, reborn);
                        if effect.flip {
                            Self::flip_colour(position, target);
                        }
                    }
                    Some(Arrival {
                        subject: RebirthSubject::Capturer,
                        square,
                        ..
                    }) => {
                        let mover = position.board.set(origin, None);
                        position.board.set(square, mover);
                        if effect.flip {
                            Self::flip_colour(position, square);
                        }
                    }
                    None => {
                        let mover = position.board.set(origin, None);
                        position.board.set(target, mover);
                        if effect.flip {
                            Self::flip_colour(position, target);
                        }
                    }
                }
            }
            Self::LongCastling {
                origin,
                target,
                origin2,
                target2,
            }
            | Self::ShortCastling {
                origin,
                target,
                origin2,
                target2,
            } => {
                let king = position.board.set(origin, None);
                position.board.set(target, king);
                let rook = position.board.set(origin2, None);
                position.board.set(target2, rook);
            }
            Self::Promotion {
                origin,
                target,
                black,
                order,
                effect,
            } => {
                let pawn = position.board.set(origin, None).expect("promotion with no pawn");
                position.promotion_box.push_back(black, order, pawn);
                let promoted = position.promotion_box.pop_front(black, order);
                position.board.set(target, Some(promoted));
                if effect.flip {
                    Self::flip_colour(position, target);
                }
            }
            Self::PromotionCapture {
                origin,
                target,
                black,
                order,
                effect,
            } => {
                let captured = position.board.set(target, None);
                position.captures.push(captured.expect("promotion capture onto an empty square"));
                let pawn = position.board.set(origin, None).expect("promotion with no pawn");
                position.promotion_box.push_back(black, order, pawn);
                let promoted = position.promotion_box.pop_front(black, order);
                match effect.rebirth {
                    Some(Arrival {
                        subject: RebirthSubject::Captured,
                        square,
                        ..
                    }) => {
                        position.board.set(target, Some(promoted));
                        let reborn = position.captures.pop();
                        position.board.set(square, reborn);
                        if effect.flip {
                            Self::flip_colour(position, target);
                        }
                    }
                    Some(Arrival {
                        subject: RebirthSubject::Capturer,
                        square,
                        ..
                    }) => {
                        position.board.set(square, Some(promoted));
                        if effect.flip {
                            Self::flip_colour(position, square);
                        }
                    }
                    None => {
                        position.board.set(target, Some(promoted));
                        if effect.flip {
                            Self::flip_colour(position, target);
                        }
                    }
                }
            }
            Self::Null => {}
        }
    }

    /// `revertPieces`: the exact inverse of [`Self::update_pieces`].
    fn revert_pieces(self, position: &mut Position) {
        match self {
            Self::Quiet { origin, target, effect } => {
                if effect.flip {
                    Self::flip_colour(position, target);
                }
                let mover = position.board.set(target, None);
                position.board.set(origin, mover);
            }
            Self::Capture { origin, target, effect } => {
                Self::revert_capture_like(position, origin, target, effect);
            }
            Self::DoubleStep { origin, target, effect, .. } => {
                if effect.flip {
                    Self::flip_colour(position, target);
                }
                let mover = position.board.set(target, None);
                position.board.set(origin, mover);
            }
            Self::EnPassant {
                origin,
                target,
                stop,
                effect,
            } => {
                match effect.rebirth {
                    Some(Arrival {
                        subject: RebirthSubject::Captured,
                        square,
                        ..
                    }) => {
                        if effect.flip {
                            Self::flip_colour(position, target);
                        }
                        let reborn = position.board.set(square, None);
                        position.captures.push(reborn.expect("missing reborn piece on unmake"));
                        let mover = position.board.set(target, None);
                        position.board.set(origin, mover);
                    }
                    Some(Arrival {
                        subject: RebirthSubject::Capturer,
                        square,
                        ..
                    }) => {
                        if effect.flip {
                            Self::flip_colour(position, square);
                        }
                        let mover = position.board.set(square, None);
                        position.board.set(origin, mover);
                    }
                    None => {
                        if effect.flip {
                            Self::flip_colour(position, target);
                        }
                        let mover = position.board.set(target, None);
                        position.board.set(origin, mover);
                    }
                }
                let captured = position.captures.pop();
                position.board.set(stop, captured);
            }
            Self::LongCastling {
                origin,
                target,
                origin2,
                target2,
            }
            | Self::ShortCastling {
                origin,
                target,
                origin2,
                target2,
            } => {
                let rook = position.board.set(target2, None);
                position.board.set(origin2, rook);
                let king = position.board.set(target, None);
                position.board.set(origin, king);
            }
            Self::Promotion {
                origin,
                target,
                black,
                order,
                effect,
            } => {
                if effect.flip {
                    Self::flip_colour(position, target);
                }
                let promoted = position.board.set(target, None).expect("unmade promotion");
                position.promotion_box.push_front(black, order, promoted);
                let pawn = position.promotion_box.pop_back(black, order);
                position.board.set(origin, Some(pawn));
            }
            Self::PromotionCapture {
                origin,
                target,
                black,
                order,
                effect,
            } => {
                let promoted_square = match effect.rebirth {
                    Some(Arrival {
                        subject: RebirthSubject::Capturer,
                        square,
                        ..
                    }) => square,
                    _ => target,
                };
                if effect.flip {
                    Self::flip_colour(position, promoted_square);
                }
                if let Some(Arrival {
                    subject: RebirthSubject::Captured,
                    square,
                    ..
                }) = effect.rebirth
                {
                    let reborn = position.board.set(square, None);
                    position.captures.push(reborn.expect("missing reborn piece on unmake"));
                }
                let promoted = position
                    .board
                    .set(promoted_square, None)
                    .expect("unmade promotion capture");
                position.promotion_box.push_front(black, order, promoted);
                let pawn = position.promotion_box.pop_back(black, order);
                position.board.set(origin, Some(pawn));
                let captured = position.captures.pop();
                position.board.set(target, captured);
            }
            Self::Null => {}
        }
    }

    /// Squares whose castling rights this move always erases (its own
    /// origin/target and, for double-step/en-passant/castling, the extra
    /// squares involved), plus the rebirth square re-added if the arriving
    /// piece is still castling-eligible there.
    fn update_castling_rights(self, position: &mut Position) {
        let state = position.state_mut();
        match self {
            Self::Quiet { origin, target, effect }
            | Self::Capture { origin, target, effect }
            | Self::Promotion { origin, target, effect, .. }
            | Self::PromotionCapture { origin, target, effect, .. } => {
                state.castling_rights.remove(&origin);
                state.castling_rights.remove(&target);
                if let Some(arrival) = effect.rebirth {
                    state.castling_rights.remove(&arrival.square);
                    if arrival.castling_eligible {
                        state.castling_rights.insert(arrival.square);
                    }
                } else if effect.flip && effect.flip_castling_eligible {
                    state.castling_rights.insert(target);
                }
            }
            Self::DoubleStep { origin, target, stop, .. } => {
                state.castling_rights.remove(&origin);
                state.castling_rights.remove(&target);
                state.castling_rights.remove(&stop);
            }
            Self::EnPassant {
                origin,
                target,
                stop,
                effect,
            } => {
                state.castling_rights.remove(&origin);
                state.castling_rights.remove(&target);
                state.castling_rights.remove(&stop);
                if let Some(arrival) = effect.rebirth {
                    state.castling_rights.remove(&arrival.square);
                    if arrival.castling_eligible {
                        state.castling_rights.insert(arrival.square);
                    }
                }
            }
            Self::LongCastling {
                origin,
                target,
                origin2,
                target2,
            }
            | Self::ShortCastling {
                origin,
                target,
                origin2,
                target2,
            } => {
                state.castling_rights.remove(&origin);
                state.castling_rights.remove(&target);
                state.castling_rights.remove(&origin2);
                state.castling_rights.remove(&target2);
            }
            Self::Null => {}
        }
    }

    /// The en-passant square this move leaves behind: `Some(stop)` for a
    /// double step, `None` for everything else (including a double step
    /// that an AntiAndernach factory downgraded to a [`Self::Quiet`]).
    const fn en_passant_after(self) -> Option<Square> {
        match self {
            Self::DoubleStep { stop, .. } => Some(stop),
            _ => None,
        }
    }

    /// `updateState`: pushes the prior state, then mutates castling rights
    /// and en-passant, then flips the side to move.
    fn update_state(self, position: &mut Position) {
        let prior = position.state().clone();
        position.memory.push(prior);
        self.update_castling_rights(position);
        let next_ep = self.en_passant_after();
        position.state_mut().en_passant = next_ep;
        position.black_to_move = !position.black_to_move;
    }

    /// `revertState`: flips the side to move back, then pops the undo
    /// stack.
    fn revert_state(position: &mut Position) {
        position.black_to_move = !position.black_to_move;
        let prior = position.memory.pop().expect("unmake without a matching make");
        *position.state_mut() = prior;
    }

    /// Castling's `preMake`: applies and reverts a null move (catching any
    /// restriction on the side to move already being in check), then
    /// applies and reverts a synthetic quiet move from the king's origin to
    /// the square it passes through, catching "castling through check".
    fn castling_pre_make(origin: Square, pass_through: Square, position: &mut Position) -> bool {
        let ok_now = Self::Null.make(position);
        Self::Null.unmake(position);
        let step = Self::Quiet {
            origin,
            target: pass_through,
            effect: Effect::NONE,
        };
        let ok_pass = step.make(position);
        step.unmake(position);
        ok_now && ok_pass
    }

    /// `make`: applies the move, then reports whether it was legal (the
    /// mover's own king is not left in check). The caller must call
    /// [`Self::unmake`] whether or not this returns `true` if it intends to
    /// keep searching past this move.
    pub fn make(self, position: &mut Position) -> bool {
        let pre_make_ok = match self {
            Self::LongCastling { origin, target, .. } | Self::ShortCastling { origin, target, .. } => {
                let pass_through = Square(mid_file(origin, target));
                Self::castling_pre_make(origin, pass_through, position)
            }
            _ => true,
        };
        self.update_pieces(position);
        self.update_state(position);
        pre_make_ok && position.is_legal()
    }

    /// `unmake`: the exact inverse of a prior [`Self::make`] call.
    pub fn unmake(self, position: &mut Position) {
        Self::revert_state(position);
        self.revert_pieces(position);
    }

    /// Long-algebraic notation for the opening fragment of this move,
    /// rendered before the move is applied (so promotion/rebirth can name
    /// the piece about to arrive).
    pub fn pre_write(self, position: &Position, locale: Locale, out: &mut String) {
        use std::fmt::Write as _;

        match self {
            Self::LongCastling { .. } => {
                out.push_str("0-0-0");
            }
            Self::ShortCastling { .. } => {
                out.push_str("0-0");
            }
            Self::Null => {
                out.push_str("null");
            }
            Self::Quiet { origin, target, effect } => {
                let code = position.board.at(origin).map_or("", |p| p.code(locale));
                let _ = write!(out, "{code}{origin}-{target}");
                write_effect_suffix(position, locale, effect, origin, target, out);
            }
            Self::Capture { origin, target, effect } => {
                let code = position.board.at(origin).map_or("", |p| p.code(locale));
                let _ = write!(out, "{code}{origin}x{target}");
                write_effect_suffix(position, locale, effect, origin, target, out);
            }
            Self::DoubleStep { origin, target, effect, .. } => {
                let code = position.board.at(origin).map_or("", |p| p.code(locale));
                let _ = write!(out, "{code}{origin}-{target}");
                write_effect_suffix(position, locale, effect, origin, target, out);
            }
            Self::EnPassant {
                origin,
                target,
                stop,
                effect,
            } => {
                let code = position.board.at(origin).map_or("", |p| p.code(locale));
                let _ = write!(out, "{code}{origin}x{target} e.p.");
                write_effect_suffix(position, locale, effect, origin, stop, out);
            }
            Self::Promotion {
                origin,
                target,
                black,
                order,
                effect,
            } => {
                let code = position.board.at(origin).map_or("", |p| p.code(locale));
                let promoted = position.promotion_box.peek_front(black, order);
                let promoted_code = promoted.map_or("", |p| p.code(locale));
                let _ = write!(out, "{code}{origin}-{target}={promoted_code}");
                write_effect_suffix(position, locale, effect, origin, target, out);
            }
            Self::PromotionCapture {
                origin,
                target,
                black,
                order,
                effect,
            } => {
                let code = position.board.at(origin).map_or("", |p| p.code(locale));
                let promoted = position.promotion_box.peek_front(black, order);
                let promoted_code = promoted.map_or("", |p| p.code(locale));
                let _ = write!(out, "{code}{origin}x{target}={promoted_code}");
                write_effect_suffix(position, locale, effect, origin, target, out);
            }
        }
    }

    /// Appends the check/mate/stalemate suffix after the move has been made
    /// and the position's own pseudo-legal replies have been generated.
    pub fn post_write(position: &mut Position, pseudo_legal: &[Self], out: &mut String) {
        let n_checks = position.is_check();
        let terminal = position.is_terminal(pseudo_legal);
        if terminal {
            if n_checks > 0 {
                if n_checks > 1 {
                    for _ in 0..n_checks {
                        out.push('+');
                    }
                }
                out.push('#');
            } else {
                out.push('=');
            }
        } else {
            for _ in 0..n_checks {
                out.push('+');
            }
        }
    }
}

/// Suffix naming a rebirth or colour flip in long-algebraic notation, e.g.
/// `(Bf1)` for a Circe rebirth or `(w)`/`(b)` for an Andernach flip.
///
/// Called before the move is made, so the rebirthed piece itself is still
/// sitting on its pre-move square rather than on `arrival.square`: a Circe
/// rebirth names the piece about to be captured, still on `captured_square`
/// (`target`, or `stop` for an en-passant capture); an AntiCirce rebirth
/// names the capturing piece itself, still on `origin`.
fn write_effect_suffix(
    position: &Position,
    locale: Locale,
    effect: Effect,
    origin: Square,
    captured_square: Square,
    out: &mut String,
) {
    use std::fmt::Write as _;

    if let Some(arrival) = effect.rebirth {
        let subject_square = match arrival.subject {
            RebirthSubject::Captured => captured_square,
            RebirthSubject::Capturer => origin,
        };
        let piece_code = position.board.at(subject_square).map_or("", |p| p.code(locale));
        let _ = write!(out, "({piece_code}{})", arrival.square);
    }
    if effect.flip {
        out.push_str(" (Andernach)");
    }
}

/// The square the king passes through when castling from `origin` to
/// `target` (its final square), one file closer to `origin` along the same
/// rank.
fn mid_file(origin: Square, target: Square) -> u8 {
    let direction: i16 = if target.0 > origin.0 { 16 } else { -16 };
    (i16::from(origin.0) + direction) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        factory::Factory,
        piece::{Piece, PieceKind},
    };

    fn empty_position() -> Position {
        Position::empty(Factory::Default)
    }

    #[test]
    fn quiet_move_make_then_unmake_restores_the_board() {
        let mut position = empty_position();
        let e2 = "e2".parse().unwrap();
        let e4 = "e4".parse().unwrap();
        position.board.set(e2, Some(Piece::new(PieceKind::Pawn, false)));
        let before = position.board.clone();

        let mv = Move::Quiet {
            origin: e2,
            target: e4,
            effect: Effect::NONE,
        };
        mv.update_pieces(&mut position);
        assert_eq!(position.board.at(e4).unwrap().kind, PieceKind::Pawn);
        mv.revert_pieces(&mut position);
        assert_eq!(position.board, before);
    }

    #[test]
    fn capture_make_then_unmake_restores_captures_stack() {
        let mut position = empty_position();
        let d4 = "d4".parse().unwrap();
        let e5 = "e5".parse().unwrap();
        position.board.set(d4, Some(Piece::new(PieceKind::Pawn, false)));
        position.board.set(e5, Some(Piece::new(PieceKind::Pawn, true)));
        let before = position.board.clone();

        let mv = Move::Capture {
            origin: d4,
            target: e5,
            effect: Effect::NONE,
        };
        mv.update_pieces(&mut position);
        assert_eq!(position.captures.len(), 1);
        assert_eq!(position.board.at(e5).unwrap().black, false);
        mv.revert_pieces(&mut position);
        assert!(position.captures.is_empty());
        assert_eq!(position.board, before);
    }

    /// `pre_write` runs before the move is made, so a Circe rebirth must
    /// name the captured piece from its own pre-move square (`target`),
    /// not from the still-empty rebirth square.
    #[test]
    fn circe_capture_notation_names_the_captured_piece_before_it_moves() {
        let mut position = Position::empty(Factory::Circe);
        let a8: Square = "a8".parse().unwrap();
        let h8: Square = "h8".parse().unwrap();
        let h1: Square = "h1".parse().unwrap();
        position.board.set(a8, Some(Piece::new(PieceKind::Rook, false)));
        position.board.set(h8, Some(Piece::new(PieceKind::Rook, true)));

        let mv = Move::Capture {
            origin: a8,
            target: h8,
            effect: Effect {
                rebirth: Some(Arrival { subject: RebirthSubject::Captured, square: h1, castling_eligible: true }),
                flip: false,
                flip_castling_eligible: false,
            },
        };

        let mut text = String::new();
        mv.pre_write(&position, crate::lang::Locale::English, &mut text);
        assert_eq!(text, "Ra8xh8(Rh1)");
    }

    /// Under AntiCirce the rebirthed piece is the *capturer*, still sitting
    /// on `origin` at `pre_write` time.
    #[test]
    fn anti_circe_capture_notation_names_the_capturing_piece() {
        let mut position = Position::empty(Factory::AntiCirce { calvet: true });
        let a1: Square = "a1".parse().unwrap();
        let a8: Square = "a8".parse().unwrap();
        position.board.set(a1, Some(Piece::new(PieceKind::Rook, false)));
        position.board.set(a8, Some(Piece::new(PieceKind::Rook, true)));

        let mv = Move::Capture {
            origin: a1,
            target: a8,
            effect: Effect {
                rebirth: Some(Arrival { subject: RebirthSubject::Capturer, square: a1, castling_eligible: true }),
                flip: false,
                flip_castling_eligible: false,
            },
        };

        let mut text = String::new();
        mv.pre_write(&position, crate::lang::Locale::English, &mut text);
        assert_eq!(text, "Ra1xa8(Ra1)");
    }

    /// An AntiAndernach quiet move whose flip leaves a rook sitting on its
    /// own colour's castling corner must grant castling rights there, the
    /// same way a Circe/AntiCirce rebirth onto a castling-eligible square
    /// does: `Effect::flip_castling_eligible` exists precisely for this case.
    #[test]
    fn anti_andernach_flip_onto_a_castling_corner_grants_castling_rights() {
        let mut position = empty_position();
        let h1: Square = "h1".parse().unwrap();
        position.board.set(h1, Some(Piece::new(PieceKind::Rook, true)));

        let mv = Move::Quiet {
            origin: h1,
            target: h1,
            effect: Effect { rebirth: None, flip: true, flip_castling_eligible: true },
        };
        mv.update_castling_rights(&mut position);
        assert!(position.state().castling_rights.contains(&h1));
    }

    /// The same flip, but landing somewhere that isn't the flipped piece's
    /// own castling corner, must not grant rights.
    #[test]
    fn anti_andernach_flip_away_from_a_castling_corner_grants_nothing() {
        let mut position = empty_position();
        let d4: Square = "d4".parse().unwrap();
        position.board.set(d4, Some(Piece::new(PieceKind::Rook, true)));

        let mv = Move::Quiet {
            origin: d4,
            target: d4,
            effect: Effect { rebirth: None, flip: true, flip_castling_eligible: false },
        };
        mv.update_castling_rights(&mut position);
        assert!(!position.state().castling_rights.contains(&d4));
    }
}
