//! Built-in strategy scripts, usable by name from the CLI and as fixtures
//! in tests.

/// Balanced baseline: bids on long suits backed by honors, pulls trump as
/// declarer, ducks under partner.
pub const STANDARD: &str = r#"strategy "Standard"
game: bidwhist

bid:
  when suit_count(best_suit()) >= 6 and high_count() >= 5: bid 4
  when suit_count(best_suit()) >= 5 and high_count() >= 4: bid 3
  when is_dealer and bid.current == 0: bid 1
  when is_dealer and bid.current <= 2: bid take
  when suit_count(best_suit()) >= 5: bid 2
  when bid.current == 0: bid 1
  default: pass

trump:
  default: choose suit: best_suit() direction: best_direction()

discard:
  when true: keep hand.trump
  when true: keep stopper_cards()
  default: drop void_candidates()

play:
  leading:
    when on_declarer_team and has_trump and outstanding_trump() > 0: play hand.trump.strongest
    when hand.boss.count > 0: play hand.boss.strongest
    default: play hand.weakest
  following:
    when partner_winning and outstanding_threats() == 0: play hand.suit(lead_suit).weakest
    when hand.suit(lead_suit).winners.count > 0: play hand.suit(lead_suit).winners.weakest
    default: play hand.suit(lead_suit).weakest
  void:
    when partner_winning: play hand.nontrump.weakest
    when has_trump and hand.trump.winners.count > 0: play hand.trump.winners.weakest
    default: play hand.weakest
"#;

/// Overbids on shape, forces trump out early and overtakes freely.
pub const AGGRESSIVE: &str = r#"strategy "Aggressive"
game: bidwhist

bid:
  when suit_count(best_suit()) >= 5 and king_ace_count() >= 2: bid 5
  when suit_count(best_suit()) >= 5: bid 4
  when suit_count(best_suit()) >= 4 and high_count() >= 4: bid 4
  when is_dealer and bid.current > 0 and bid.current < 4: bid take
  when bid.current < 3: bid 3
  default: pass

trump:
  when low_count() > high_count() and ace_count() >= 2: choose suit: best_suit() direction: downtown
  when low_count() > high_count(): choose suit: best_suit() direction: downtown-noaces
  default: choose suit: best_suit() direction: uptown

discard:
  when true: keep hand.trump
  default: drop hand.nontrump

play:
  leading:
    when has_trump and outstanding_trump() > 0: play hand.trump.strongest
    when hand.boss.count > 0: play hand.boss.strongest
    default: play hand.weakest
  following:
    when hand.suit(lead_suit).winners.count > 0: play hand.suit(lead_suit).winners.strongest_safe
    default: play hand.suit(lead_suit).weakest
  void:
    when has_trump and not partner_winning: play hand.trump.winners.weakest
    default: play hand.weakest
"#;

/// Bids only rock-solid hands, keeps stoppers and suit coverage, never
/// wastes an honor under partner.
pub const CONSERVATIVE: &str = r#"strategy "Conservative"
game: bidwhist

bid:
  when suit_count(best_suit()) >= 7: bid 4
  when suit_count(best_suit()) >= 6 and king_ace_count() >= 3: bid 3
  when is_dealer and bid.current == 0: bid 1
  default: pass

trump:
  default: choose suit: best_suit() direction: best_direction()

discard:
  when true: keep hand.trump
  when true: keep stopper_cards()
  when true: keep suit_keepers(1)
  default: drop void_candidates()

play:
  leading:
    when hand.boss.count > 0: play hand.boss.strongest
    default: play hand.weakest
  following:
    when partner_winning: play hand.suit(lead_suit).weakest
    when hand.suit(lead_suit).winners.count > 0: play hand.suit(lead_suit).winners.weakest
    default: play hand.suit(lead_suit).weakest
  void:
    when partner_winning: play hand.weakest
    when has_trump: play hand.trump.weakest
    default: play hand.weakest
"#;

pub const BUILTIN_NAMES: &[&str] = &["standard", "aggressive", "conservative"];

/// Look up an embedded strategy script by name.
pub fn builtin(name: &str) -> Option<&'static str> {
    match name {
        "standard" => Some(STANDARD),
        "aggressive" => Some(AGGRESSIVE),
        "conservative" => Some(CONSERVATIVE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whist_parser::parse_strategy;

    #[test]
    fn test_all_builtins_parse() {
        for &name in BUILTIN_NAMES {
            let source = builtin(name).unwrap();
            let ast = parse_strategy(source).unwrap();
            assert!(ast.bid.is_some(), "{} has no bid section", name);
            assert!(ast.trump.is_some(), "{} has no trump section", name);
            assert!(ast.discard.is_some(), "{} has no discard section", name);
            assert!(ast.play.is_some(), "{} has no play section", name);
        }
    }

    #[test]
    fn test_unknown_builtin_is_none() {
        assert_eq!(builtin("bold"), None);
    }
}
