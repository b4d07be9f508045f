//! Strategy evaluator: walks a parsed strategy against a decision context
//! and produces a card to play, a bid, a trump choice, or a discard set.
//!
//! Expression evaluation is dynamically typed and never fails: unknown names
//! and type mismatches evaluate to `Undefined`, which is falsy, so a bad rule
//! simply does not match and the caller falls back to its built-in heuristic.

pub mod builtins;
pub mod context;
pub mod value;

use rustc_hash::FxHashSet;
use whist_core::{Card, Direction, Suit};
use whist_parser::{Action, BinOp, Expr, RuleBlock, StrategyAst};

pub use context::StrategyContext;
pub use value::Value;

pub fn eval_expr(expr: &Expr, ctx: &StrategyContext) -> Value {
    match expr {
        Expr::Number(n) => Value::Num(*n),
        Expr::Str(s) => Value::Str(s.clone()),
        Expr::Bool(b) => Value::Bool(*b),
        Expr::Variable(name) => resolve_variable(name, ctx),
        Expr::Not(operand) => Value::Bool(!eval_expr(operand, ctx).truthy()),
        Expr::Binary { op, left, right } => eval_binary(*op, left, right, ctx),
        Expr::Call { name, args } => {
            let args: Vec<Value> = args.iter().map(|a| eval_expr(a, ctx)).collect();
            eval_call(name, &args, ctx)
        }
        Expr::Property { object, property, args } => eval_property(object, property, args, ctx),
    }
}

fn resolve_variable(name: &str, ctx: &StrategyContext) -> Value {
    match name {
        "hand" => Value::Set(ctx.hand.clone()),
        "lead_suit" => match ctx.lead_suit {
            Some(s) => Value::Str(s.name().to_string()),
            None => Value::Null,
        },
        "trump_suit" => match ctx.trump_suit {
            Some(s) => Value::Str(s.name().to_string()),
            None => Value::Null,
        },
        "declarer" => match ctx.declarer {
            Some(p) => Value::Num(p as i64),
            None => Value::Null,
        },
        "partner_winning" => Value::Bool(ctx.partner_winning),
        "partner_led" => Value::Bool(ctx.partner_led),
        "on_declarer_team" => Value::Bool(ctx.on_declarer_team),
        "is_dealer" => Value::Bool(ctx.is_dealer),
        "has_trump" => Value::Bool(ctx.has_trump),
        "is_first_trick" => Value::Bool(ctx.is_first_trick),
        "partner_bid" => Value::Num(ctx.partner_bid),
        "bid_count" => Value::Num(ctx.bids.len() as i64),
        "bid_direction" => Value::Str(ctx.direction.name().to_string()),
        "me" => Value::Player(ctx.player_id),
        // Direction literals parse as variables and resolve to themselves.
        "uptown" | "downtown" | "downtown-noaces" => Value::Str(name.to_string()),
        _ => Value::Undefined,
    }
}

fn eval_binary(op: BinOp, left: &Expr, right: &Expr, ctx: &StrategyContext) -> Value {
    let left = eval_expr(left, ctx);
    let right = eval_expr(right, ctx);

    match op {
        BinOp::Eq => Value::Bool(left == right),
        BinOp::Ne => Value::Bool(left != right),
        BinOp::Gt | BinOp::Lt | BinOp::Ge | BinOp::Le => Value::Bool(compare_values(op, &left, &right)),
        BinOp::And => {
            if left.truthy() {
                right
            } else {
                left
            }
        }
        BinOp::Or => {
            if left.truthy() {
                left
            } else {
                right
            }
        }
        BinOp::Add => match (&left, &right) {
            (Value::Num(a), Value::Num(b)) => Value::Num(a + b),
            (Value::Str(a), Value::Str(b)) => Value::Str(format!("{}{}", a, b)),
            _ => Value::Undefined,
        },
        BinOp::Sub => match (&left, &right) {
            (Value::Num(a), Value::Num(b)) => Value::Num(a - b),
            _ => Value::Undefined,
        },
    }
}

fn compare_values(op: BinOp, left: &Value, right: &Value) -> bool {
    let ord = match (left, right) {
        (Value::Num(a), Value::Num(b)) => a.cmp(b),
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        _ => return false,
    };
    match op {
        BinOp::Gt => ord.is_gt(),
        BinOp::Lt => ord.is_lt(),
        BinOp::Ge => ord.is_ge(),
        BinOp::Le => ord.is_le(),
        _ => false,
    }
}

fn eval_call(name: &str, args: &[Value], ctx: &StrategyContext) -> Value {
    match name {
        "cards_above" => match args.first().and_then(Value::as_card) {
            Some(card) => Value::Num(builtins::cards_above(card, ctx)),
            None => Value::Num(0),
        },
        "gap" => {
            let a = args.first().and_then(Value::as_card);
            let b = args.get(1).and_then(Value::as_card);
            match (a, b) {
                (Some(a), Some(b)) => Value::Num(builtins::gap(a, b, ctx)),
                _ => Value::Num(0),
            }
        }
        "suit_count" => {
            let suit = args.first().and_then(|v| v.as_str()).and_then(Suit::from_name);
            match suit {
                Some(suit) => Value::Num(builtins::suit_count(suit, ctx)),
                None => Value::Num(0),
            }
        }
        "best_suit" => Value::Str(builtins::best_suit(ctx).name().to_string()),
        "low_count" => Value::Num(builtins::low_count(ctx)),
        "high_count" => Value::Num(builtins::high_count(ctx)),
        "ace_count" => Value::Num(builtins::ace_count(ctx)),
        "deuce_trey_count" => Value::Num(builtins::deuce_trey_count(ctx)),
        "king_ace_count" => Value::Num(builtins::king_ace_count(ctx)),
        "king_count" => Value::Num(builtins::king_count(ctx)),
        "have" => match args.first().and_then(|v| v.as_str()) {
            Some(id) => Value::Bool(builtins::have_card(id, ctx)),
            None => Value::Bool(false),
        },
        "min" => match (args.first().and_then(Value::as_num), args.get(1).and_then(Value::as_num)) {
            (Some(a), Some(b)) => Value::Num(a.min(b)),
            _ => Value::Undefined,
        },
        "max" => match (args.first().and_then(Value::as_num), args.get(1).and_then(Value::as_num)) {
            (Some(a), Some(b)) => Value::Num(a.max(b)),
            _ => Value::Undefined,
        },
        "partner_card" => ctx.partner_card().into(),
        "best_direction" => Value::Str(builtins::best_direction(ctx).name().to_string()),
        "max_suit_count" => Value::Num(builtins::max_suit_count(ctx)),
        "min_suit_count" => Value::Num(builtins::min_suit_count(ctx)),
        "outstanding_trump" => Value::Num(builtins::outstanding_trump(ctx)),
        "outstanding_threats" => Value::Num(builtins::outstanding_threats(ctx)),
        "stopper_cards" => Value::Set(builtins::stopper_cards(ctx)),
        "suit_keepers" => {
            let n = args.first().and_then(Value::as_num).unwrap_or(1);
            Value::Set(builtins::suit_keepers(n, ctx))
        }
        "void_candidates" => Value::Set(builtins::void_candidates(ctx)),
        _ => Value::Undefined,
    }
}

fn eval_property(object: &Expr, property: &str, args: &Option<Vec<Expr>>, ctx: &StrategyContext) -> Value {
    let obj = eval_expr(object, ctx);
    let args: Vec<Value> = args
        .as_ref()
        .map(|a| a.iter().map(|e| eval_expr(e, ctx)).collect())
        .unwrap_or_default();

    if let Value::Set(cards) = &obj {
        match property {
            "trump" => return Value::Set(builtins::filter_trump(cards, ctx.trump_suit)),
            "nontrump" => return Value::Set(builtins::filter_non_trump(cards, ctx.trump_suit)),
            "spades" => return Value::Set(builtins::filter_suit(cards, Suit::Spades)),
            "hearts" => return Value::Set(builtins::filter_suit(cards, Suit::Hearts)),
            "diamonds" => return Value::Set(builtins::filter_suit(cards, Suit::Diamonds)),
            "clubs" => return Value::Set(builtins::filter_suit(cards, Suit::Clubs)),
            "first" => return cards.first().copied().into(),
            "suit" => {
                if args.is_empty() {
                    return obj;
                }
                let suit = args[0].as_str().and_then(Suit::from_name);
                return match suit {
                    Some(suit) => Value::Set(builtins::filter_suit(cards, suit)),
                    None => Value::Set(Vec::new()),
                };
            }
            "strongest" => return builtins::strongest(cards, ctx).into(),
            "weakest" => return builtins::weakest(cards, ctx).into(),
            "strongest_safe" => return builtins::strongest_safe(cards, ctx).into(),
            "winners" => return Value::Set(builtins::winners(cards, ctx)),
            "losers" => return Value::Set(builtins::losers(cards, ctx)),
            "boss" => return Value::Set(builtins::boss(cards, ctx)),
            "count" => return Value::Num(cards.len() as i64),
            "above" => {
                if args.is_empty() {
                    return obj;
                }
                return match args[0].as_card() {
                    Some(pivot) => Value::Set(builtins::above(cards, pivot, ctx)),
                    None => Value::Set(Vec::new()),
                };
            }
            "below" => {
                if args.is_empty() {
                    return obj;
                }
                return match args[0].as_card() {
                    Some(pivot) => Value::Set(builtins::below(cards, pivot, ctx)),
                    None => Value::Set(Vec::new()),
                };
            }
            _ => {}
        }
    }

    if let Value::Card(card) = obj {
        match property {
            "suit" => return Value::Str(card.suit.name().to_string()),
            "rank" => return Value::Num(i64::from(card.rank)),
            "id" => return Value::Str(card.id()),
            _ => {}
        }
    }

    if let Value::Player(id) = obj {
        if property == "id" {
            return Value::Num(id as i64);
        }
    }

    // Namespace lookups that do not resolve through a value.
    if let Expr::Variable(name) = object {
        if name == "bid" && property == "current" {
            return Value::Num(ctx.current_high_bid);
        }
        if name == "trick" && property == "winner" {
            return match ctx.current_winner() {
                Some(idx) => Value::Card(ctx.current_trick[idx].card),
                None => Value::Null,
            };
        }
    }

    Value::Undefined
}

/// First rule whose condition is truthy, else the block's default.
fn eval_rule_block<'a>(block: &'a RuleBlock, ctx: &StrategyContext) -> Option<&'a Action> {
    for rule in &block.rules {
        if eval_expr(&rule.condition, ctx).truthy() {
            return Some(&rule.action);
        }
    }
    block.default_action.as_ref()
}

/// Pick a card under the play section. The sub-block is chosen by position:
/// leading on an empty trick, following when the lead suit is held, void
/// otherwise. Returns None when the strategy has no answer.
pub fn evaluate_play(ast: &StrategyAst, ctx: &StrategyContext) -> Option<Card> {
    let play = ast.play.as_ref()?;

    let block = if ctx.current_trick.is_empty() {
        play.leading.as_ref()
    } else {
        let holds_lead = ctx.lead_suit.map(|s| ctx.holds_suit(s)).unwrap_or(false);
        if holds_lead {
            play.following.as_ref()
        } else {
            play.when_void.as_ref()
        }
    }?;

    let action = eval_rule_block(block, ctx)?;
    let Action::Play(expr) = action else {
        return None;
    };
    match eval_expr(expr, ctx) {
        Value::Card(card) => Some(card),
        Value::Set(cards) => cards.first().copied(),
        _ => None,
    }
}

/// Bid amount: a number, 0 for pass, -1 for the dealer's take.
pub fn evaluate_bid(ast: &StrategyAst, ctx: &StrategyContext) -> Option<i64> {
    let block = ast.bid.as_ref()?;
    match eval_rule_block(block, ctx)? {
        Action::Bid(expr) => eval_expr(expr, ctx).as_num(),
        Action::Pass => Some(0),
        _ => None,
    }
}

/// Trump suit and direction. None when the suit does not resolve to a
/// valid name; an unrecognized direction keeps the suit and defaults to
/// uptown.
pub fn evaluate_trump(ast: &StrategyAst, ctx: &StrategyContext) -> Option<(Suit, Direction)> {
    let block = ast.trump.as_ref()?;
    let Action::Choose { suit, direction } = eval_rule_block(block, ctx)? else {
        return None;
    };
    let suit = eval_expr(suit, ctx).as_str().and_then(Suit::from_name)?;
    let direction = eval_expr(direction, ctx)
        .as_str()
        .and_then(Direction::from_name)
        .unwrap_or(Direction::Uptown);
    Some((suit, direction))
}

/// The four cards to discard from a 16-card declarer hand.
///
/// Unlike the other sections this collects every matching rule: the default
/// always applies, keep marks push cards up, drop marks push them down, and
/// trump gets a standing bonus. The four lowest-scoring cards go, ties
/// resolved by hand order.
pub fn evaluate_discard(ast: &StrategyAst, ctx: &StrategyContext) -> Option<Vec<Card>> {
    let block = ast.discard.as_ref()?;

    let mut keep: FxHashSet<Card> = FxHashSet::default();
    let mut drop: FxHashSet<Card> = FxHashSet::default();

    if let Some(action) = &block.default_action {
        collect_discard_action(action, ctx, &mut keep, &mut drop);
    }
    for rule in &block.rules {
        if eval_expr(&rule.condition, ctx).truthy() {
            collect_discard_action(&rule.action, ctx, &mut keep, &mut drop);
        }
    }

    let mut scored: Vec<(Card, i64)> = ctx
        .hand
        .iter()
        .map(|&card| {
            let mut score = ctx.card_value(card);
            if ctx.trump_suit == Some(card.suit) {
                score += 100;
            }
            if keep.contains(&card) {
                score += 1000;
            }
            if drop.contains(&card) {
                score -= 1000;
            }
            (card, score)
        })
        .collect();

    scored.sort_by_key(|&(_, score)| score);
    Some(scored.into_iter().take(4).map(|(card, _)| card).collect())
}

fn collect_discard_action(
    action: &Action,
    ctx: &StrategyContext,
    keep: &mut FxHashSet<Card>,
    drop: &mut FxHashSet<Card>,
) {
    match action {
        Action::Keep(expr) => {
            if let Value::Set(cards) = eval_expr(expr, ctx) {
                keep.extend(cards);
            }
        }
        Action::Drop(expr) => {
            if let Value::Set(cards) = eval_expr(expr, ctx) {
                drop.extend(cards);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whist_core::TrickPlay;
    use whist_parser::parse_strategy;

    fn card(id: &str) -> Card {
        Card::from_id(id).unwrap()
    }

    fn hand_of(ids: &[&str]) -> Vec<Card> {
        ids.iter().map(|id| card(id)).collect()
    }

    fn ctx_with_hand(ids: &[&str]) -> StrategyContext {
        StrategyContext { hand: hand_of(ids), ..Default::default() }
    }

    fn eval_one(source: &str, ctx: &StrategyContext) -> Value {
        let full = format!("bid:\n  when {}: bid 1\n  default: pass\n", source);
        let ast = parse_strategy(&full).unwrap();
        eval_expr(&ast.bid.unwrap().rules[0].condition, ctx)
    }

    #[test]
    fn test_arithmetic_and_comparison() {
        let ctx = ctx_with_hand(&[]);
        assert_eq!(eval_one("2 + 3", &ctx), Value::Num(5));
        assert_eq!(eval_one("5 - 2 > 2", &ctx), Value::Bool(true));
        assert_eq!(eval_one("min(4, 2)", &ctx), Value::Num(2));
        assert_eq!(eval_one("max(4, 2)", &ctx), Value::Num(4));
    }

    #[test]
    fn test_and_or_return_operands() {
        let ctx = ctx_with_hand(&[]);
        assert_eq!(eval_one("0 or 7", &ctx), Value::Num(7));
        assert_eq!(eval_one("3 and 7", &ctx), Value::Num(7));
        assert_eq!(eval_one("0 and 7", &ctx), Value::Num(0));
        assert_eq!(eval_one("not 0", &ctx), Value::Bool(true));
    }

    #[test]
    fn test_unknown_names_are_undefined_and_falsy() {
        let ctx = ctx_with_hand(&[]);
        assert_eq!(eval_one("mystery_var", &ctx), Value::Undefined);
        assert_eq!(eval_one("mystery_fn(1)", &ctx), Value::Undefined);
        assert!(!eval_one("mystery_var", &ctx).truthy());
    }

    #[test]
    fn test_cross_kind_equality_is_false() {
        let mut ctx = ctx_with_hand(&[]);
        ctx.lead_suit = None;
        // lead_suit is null here; comparing against a string is just false.
        assert_eq!(eval_one("lead_suit == \"hearts\"", &ctx), Value::Bool(false));
        assert_eq!(eval_one("lead_suit != \"hearts\"", &ctx), Value::Bool(true));
    }

    #[test]
    fn test_direction_literals_resolve_to_themselves() {
        let ctx = ctx_with_hand(&[]);
        assert_eq!(eval_one("downtown", &ctx), Value::Str("downtown".into()));
        assert_eq!(
            eval_one("downtown-noaces", &ctx),
            Value::Str("downtown-noaces".into())
        );
        // Suit names are not literals; they stay undefined.
        assert_eq!(eval_one("spades", &ctx), Value::Undefined);
    }

    #[test]
    fn test_namespace_properties() {
        let mut ctx = ctx_with_hand(&[]);
        ctx.current_high_bid = 4;
        ctx.player_id = 2;
        assert_eq!(eval_one("bid.current", &ctx), Value::Num(4));
        assert_eq!(eval_one("me.id", &ctx), Value::Num(2));
        assert_eq!(eval_one("trick.winner", &ctx), Value::Null);

        ctx.current_trick = vec![TrickPlay { player: 0, card: card("hearts_9") }];
        assert_eq!(eval_one("trick.winner", &ctx), Value::Card(card("hearts_9")));
        assert_eq!(eval_one("trick.winner.rank", &ctx), Value::Num(9));
        assert_eq!(
            eval_one("trick.winner.suit", &ctx),
            Value::Str("hearts".into())
        );
    }

    #[test]
    fn test_card_set_pipeline() {
        let mut ctx = ctx_with_hand(&["spades_2", "spades_9", "hearts_4", "clubs_12"]);
        ctx.trump_suit = Some(Suit::Spades);
        assert_eq!(eval_one("hand.trump.count", &ctx), Value::Num(2));
        assert_eq!(eval_one("hand.nontrump.count", &ctx), Value::Num(2));
        assert_eq!(eval_one("hand.hearts.count", &ctx), Value::Num(1));
        assert_eq!(
            eval_one("hand.suit(\"clubs\").strongest", &ctx),
            Value::Card(card("clubs_12"))
        );
        assert_eq!(eval_one("hand.trump.weakest", &ctx), Value::Card(card("spades_2")));
        assert_eq!(
            eval_one("hand.above(hand.suit(\"spades\").weakest).count", &ctx),
            Value::Num(1)
        );
    }

    #[test]
    fn test_no_trump_set_filters() {
        let ctx = ctx_with_hand(&["spades_2", "hearts_4"]);
        assert_eq!(eval_one("hand.trump.count", &ctx), Value::Num(0));
        assert_eq!(eval_one("hand.nontrump.count", &ctx), Value::Num(2));
    }

    #[test]
    fn test_suit_shorthands_and_first() {
        let ctx = ctx_with_hand(&["spades_2", "diamonds_8", "clubs_3", "clubs_9"]);
        assert_eq!(eval_one("hand.spades.count", &ctx), Value::Num(1));
        assert_eq!(eval_one("hand.diamonds.count", &ctx), Value::Num(1));
        assert_eq!(eval_one("hand.clubs.count", &ctx), Value::Num(2));
        // .first keeps hand order, not rank order.
        assert_eq!(eval_one("hand.clubs.first", &ctx), Value::Card(card("clubs_3")));
        assert_eq!(eval_one("hand.first", &ctx), Value::Card(card("spades_2")));
        assert_eq!(eval_one("hand.hearts.first", &ctx), Value::Null);
    }

    #[test]
    fn test_evaluate_bid_first_match_wins() {
        let source = "bid:\n  when suit_count(best_suit()) >= 3: bid 4\n  when true: bid 5\n  default: pass\n";
        let ast = parse_strategy(source).unwrap();
        let ctx = ctx_with_hand(&["hearts_2", "hearts_5", "hearts_9"]);
        assert_eq!(evaluate_bid(&ast, &ctx), Some(4));

        let short = ctx_with_hand(&["hearts_2"]);
        assert_eq!(evaluate_bid(&ast, &short), Some(5));
    }

    #[test]
    fn test_evaluate_bid_pass_and_take() {
        let source = "bid:\n  when is_dealer and bid.current > 0: bid take\n  default: pass\n";
        let ast = parse_strategy(source).unwrap();

        let mut ctx = ctx_with_hand(&[]);
        assert_eq!(evaluate_bid(&ast, &ctx), Some(0));

        ctx.is_dealer = true;
        ctx.current_high_bid = 3;
        assert_eq!(evaluate_bid(&ast, &ctx), Some(-1));
    }

    #[test]
    fn test_evaluate_bid_no_section() {
        let ast = parse_strategy("trump:\n  default: choose suit: \"spades\" direction: \"uptown\"\n").unwrap();
        assert_eq!(evaluate_bid(&ast, &ctx_with_hand(&[])), None);
    }

    #[test]
    fn test_evaluate_trump_resolves_names() {
        let source = "trump:\n  default: choose suit: best_suit() direction: best_direction()\n";
        let ast = parse_strategy(source).unwrap();
        let ctx = ctx_with_hand(&["hearts_2", "hearts_3", "hearts_4", "spades_13", "spades_12"]);
        assert_eq!(
            evaluate_trump(&ast, &ctx),
            Some((Suit::Hearts, Direction::Downtown))
        );
    }

    #[test]
    fn test_evaluate_trump_invalid_suit_is_none() {
        let source = "trump:\n  default: choose suit: \"stars\" direction: \"uptown\"\n";
        let ast = parse_strategy(source).unwrap();
        assert_eq!(evaluate_trump(&ast, &ctx_with_hand(&[])), None);
    }

    #[test]
    fn test_evaluate_trump_unknown_direction_defaults_uptown() {
        // A bad direction name must not throw away the suit choice.
        let source = "trump:\n  default: choose suit: \"spades\" direction: \"sideways\"\n";
        let ast = parse_strategy(source).unwrap();
        assert_eq!(
            evaluate_trump(&ast, &ctx_with_hand(&[])),
            Some((Suit::Spades, Direction::Uptown))
        );

        // Same fallback when the direction expression is not a string at all.
        let source = "trump:\n  default: choose suit: \"hearts\" direction: 3\n";
        let ast = parse_strategy(source).unwrap();
        assert_eq!(
            evaluate_trump(&ast, &ctx_with_hand(&[])),
            Some((Suit::Hearts, Direction::Uptown))
        );
    }

    #[test]
    fn test_evaluate_play_section_selection() {
        let source = "play:\n  leading:\n    default: play hand.strongest\n  following:\n    default: play hand.suit(lead_suit).weakest\n  void:\n    default: play hand.weakest\n";
        let ast = parse_strategy(source).unwrap();

        let mut ctx = ctx_with_hand(&["spades_1", "hearts_4", "hearts_9"]);
        // Empty trick: leading.
        assert_eq!(evaluate_play(&ast, &ctx), Some(card("spades_1")));

        // Holding the lead suit: following.
        ctx.current_trick = vec![TrickPlay { player: 1, card: card("hearts_7") }];
        ctx.lead_suit = Some(Suit::Hearts);
        assert_eq!(evaluate_play(&ast, &ctx), Some(card("hearts_4")));

        // Void in the lead suit.
        ctx.lead_suit = Some(Suit::Clubs);
        ctx.current_trick = vec![TrickPlay { player: 1, card: card("clubs_7") }];
        assert_eq!(evaluate_play(&ast, &ctx), Some(card("hearts_4")));
    }

    #[test]
    fn test_evaluate_play_set_takes_first_card() {
        let source = "play:\n  leading:\n    default: play hand.suit(\"hearts\")\n";
        let ast = parse_strategy(source).unwrap();
        let ctx = ctx_with_hand(&["spades_1", "hearts_4", "hearts_9"]);
        assert_eq!(evaluate_play(&ast, &ctx), Some(card("hearts_4")));
    }

    #[test]
    fn test_evaluate_play_no_match_no_default() {
        let source = "play:\n  leading:\n    when false: play hand.strongest\n";
        let ast = parse_strategy(source).unwrap();
        assert_eq!(evaluate_play(&ast, &ctx_with_hand(&["spades_1"])), None);
    }

    #[test]
    fn test_evaluate_discard_collects_all_rules() {
        let source = "discard:\n  when true: keep stopper_cards()\n  when hand.trump.count > 0: keep hand.trump\n  default: drop void_candidates()\n";
        let ast = parse_strategy(source).unwrap();

        let mut ctx = ctx_with_hand(&[
            "clubs_1", "clubs_2", "clubs_3", "clubs_4", "clubs_5",
            "spades_13", "spades_2", "hearts_1", "hearts_2",
            "diamonds_9", "diamonds_3", "diamonds_4", "diamonds_5",
            "spades_5", "hearts_5", "diamonds_2",
        ]);
        ctx.trump_suit = Some(Suit::Clubs);

        let discards = evaluate_discard(&ast, &ctx).unwrap();
        assert_eq!(discards.len(), 4);
        // Trump and kept stoppers never go.
        for c in &discards {
            assert_ne!(c.suit, Suit::Clubs);
            assert_ne!(*c, card("spades_13"));
        }
    }

    #[test]
    fn test_evaluate_discard_drop_forces_cards_out() {
        let source = "discard:\n  default: drop hand.hearts\n";
        let ast = parse_strategy(source).unwrap();
        let ctx = ctx_with_hand(&[
            "hearts_1", "hearts_13", "hearts_12", "hearts_11",
            "spades_2", "spades_3", "clubs_2", "diamonds_2",
        ]);
        let discards = evaluate_discard(&ast, &ctx).unwrap();
        // All four hearts go, lowest adjusted value first (ace is highest).
        assert_eq!(
            discards,
            hand_of(&["hearts_11", "hearts_12", "hearts_13", "hearts_1"])
        );
    }

    #[test]
    fn test_evaluate_discard_ties_keep_hand_order() {
        let source = "discard:\n  default: keep hand.trump\n";
        let ast = parse_strategy(source).unwrap();
        let mut ctx = ctx_with_hand(&["hearts_7", "diamonds_7", "spades_7", "clubs_7", "clubs_2"]);
        ctx.trump_suit = Some(Suit::Clubs);
        let discards = evaluate_discard(&ast, &ctx).unwrap();
        // The three equal-value sevens go in hand order, then the next
        // cheapest non-kept card.
        assert_eq!(discards[..3], hand_of(&["hearts_7", "diamonds_7", "spades_7"]));
    }
}
