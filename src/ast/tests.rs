//! Unit tests for the type engine and the typing pass.

use super::typing::add_type;
use super::*;
use crate::token::Span;

fn span() -> Span {
    Span::new(0, 0, 1, 1)
}

fn num(value: i64) -> Expr {
    Expr::new(ExprKind::IntLiteral(value), span())
}

fn var_expr(index: usize) -> Expr {
    Expr::new(ExprKind::Var(VarId(index)), span())
}

fn local(name: &str, ty: Type) -> Var {
    Var {
        name: name.to_string(),
        ty,
        is_local: true,
        offset: 0,
        contents: None,
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span(),
    )
}

// ===================
// Sizes and layout
// ===================

#[test]
fn test_scalar_sizes() {
    assert_eq!(Type::Char.size(), 1);
    assert_eq!(Type::Int.size(), 8);
    assert_eq!(Type::pointer_to(Type::Int).size(), 8);
    assert_eq!(Type::pointer_to(Type::pointer_to(Type::Char)).size(), 8);
}

#[test]
fn test_array_sizes() {
    assert_eq!(Type::array_of(Type::Int, 3).size(), 24);
    assert_eq!(Type::array_of(Type::Char, 10).size(), 10);
    // Array of 3 pointers to int.
    assert_eq!(Type::array_of(Type::pointer_to(Type::Int), 3).size(), 24);
    // Nested arrays multiply out.
    assert_eq!(
        Type::array_of(Type::array_of(Type::Int, 3), 2).size(),
        48
    );
}

#[test]
fn test_struct_layout_is_packed() {
    let ty = Type::struct_of(vec![
        ("a".to_string(), Type::Char),
        ("b".to_string(), Type::Int),
        ("c".to_string(), Type::Char),
    ]);

    assert_eq!(ty.size(), 10);

    let a = ty.find_member("a").unwrap();
    let b = ty.find_member("b").unwrap();
    let c = ty.find_member("c").unwrap();
    assert_eq!(a.offset, 0);
    assert_eq!(b.offset, 1);
    assert_eq!(c.offset, 9);
}

#[test]
fn test_find_member_unknown_name() {
    let ty = Type::struct_of(vec![("a".to_string(), Type::Int)]);
    assert!(ty.find_member("b").is_none());
    assert!(Type::Int.find_member("a").is_none());
}

#[test]
fn test_is_integer() {
    assert!(Type::Char.is_integer());
    assert!(Type::Int.is_integer());
    assert!(!Type::pointer_to(Type::Int).is_integer());
    assert!(!Type::array_of(Type::Int, 2).is_integer());
}

#[test]
fn test_base() {
    assert_eq!(Type::pointer_to(Type::Char).base(), Some(&Type::Char));
    assert_eq!(Type::array_of(Type::Int, 4).base(), Some(&Type::Int));
    assert_eq!(Type::Int.base(), None);
}

#[test]
fn test_align_to() {
    assert_eq!(align_to(0, 8), 0);
    assert_eq!(align_to(1, 8), 8);
    assert_eq!(align_to(8, 8), 8);
    assert_eq!(align_to(9, 8), 16);
    assert_eq!(align_to(17, 16), 32);
}

// ===================
// Typing pass
// ===================

#[test]
fn test_int_literal_types_as_int() {
    let mut expr = num(7);
    add_type(&mut expr, &[]).unwrap();
    assert_eq!(expr.ty, Some(Type::Int));
}

#[test]
fn test_var_takes_referent_type() {
    let vars = vec![local("p", Type::pointer_to(Type::Char))];
    let mut expr = var_expr(0);
    add_type(&mut expr, &vars).unwrap();
    assert_eq!(expr.ty, Some(Type::pointer_to(Type::Char)));
}

#[test]
fn test_arithmetic_and_comparisons_type_as_int() {
    for op in [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Lt,
        BinaryOp::Le,
    ] {
        let mut expr = binary(op, num(1), num(2));
        add_type(&mut expr, &[]).unwrap();
        assert_eq!(expr.ty, Some(Type::Int), "op {:?}", op);
    }
}

#[test]
fn test_ptr_add_takes_pointer_operand_type() {
    let vars = vec![local("p", Type::pointer_to(Type::Int))];
    let mut expr = binary(BinaryOp::PtrAdd, var_expr(0), num(1));
    add_type(&mut expr, &vars).unwrap();
    assert_eq!(expr.ty, Some(Type::pointer_to(Type::Int)));
}

#[test]
fn test_ptr_diff_types_as_int() {
    let vars = vec![local("p", Type::pointer_to(Type::Int))];
    let mut expr = binary(BinaryOp::PtrDiff, var_expr(0), var_expr(0));
    add_type(&mut expr, &vars).unwrap();
    assert_eq!(expr.ty, Some(Type::Int));
}

#[test]
fn test_assign_takes_lhs_type() {
    let vars = vec![local("c", Type::Char)];
    let mut expr = Expr::new(
        ExprKind::Assign {
            lhs: Box::new(var_expr(0)),
            rhs: Box::new(num(65)),
        },
        span(),
    );
    add_type(&mut expr, &vars).unwrap();
    assert_eq!(expr.ty, Some(Type::Char));
}

#[test]
fn test_addr_of_scalar() {
    let vars = vec![local("x", Type::Int)];
    let mut expr = Expr::new(ExprKind::Addr(Box::new(var_expr(0))), span());
    add_type(&mut expr, &vars).unwrap();
    assert_eq!(expr.ty, Some(Type::pointer_to(Type::Int)));
}

#[test]
fn test_addr_of_array_points_at_element() {
    let vars = vec![local("a", Type::array_of(Type::Char, 4))];
    let mut expr = Expr::new(ExprKind::Addr(Box::new(var_expr(0))), span());
    add_type(&mut expr, &vars).unwrap();
    assert_eq!(expr.ty, Some(Type::pointer_to(Type::Char)));
}

#[test]
fn test_deref_of_pointer() {
    let vars = vec![local("p", Type::pointer_to(Type::Int))];
    let mut expr = Expr::new(ExprKind::Deref(Box::new(var_expr(0))), span());
    add_type(&mut expr, &vars).unwrap();
    assert_eq!(expr.ty, Some(Type::Int));
}

#[test]
fn test_deref_of_array_yields_element() {
    let vars = vec![local("a", Type::array_of(Type::Int, 3))];
    let mut expr = Expr::new(ExprKind::Deref(Box::new(var_expr(0))), span());
    add_type(&mut expr, &vars).unwrap();
    assert_eq!(expr.ty, Some(Type::Int));
}

#[test]
fn test_deref_of_integer_is_an_error() {
    let mut expr = Expr::new(ExprKind::Deref(Box::new(num(3))), span());
    let error = add_type(&mut expr, &[]).unwrap_err();
    assert!(error.message.contains("invalid pointer dereference"));
}

#[test]
fn test_member_access_resolves_type_and_offset() {
    let ty = Type::struct_of(vec![
        ("a".to_string(), Type::Int),
        ("b".to_string(), Type::Char),
    ]);
    let vars = vec![local("s", ty)];

    let mut expr = Expr::new(
        ExprKind::Member {
            base: Box::new(var_expr(0)),
            name: "b".to_string(),
            offset: 0,
        },
        span(),
    );
    add_type(&mut expr, &vars).unwrap();

    assert_eq!(expr.ty, Some(Type::Char));
    let ExprKind::Member { offset, .. } = expr.kind else {
        panic!("expected member node");
    };
    assert_eq!(offset, 8);
}

#[test]
fn test_member_access_on_non_struct_is_an_error() {
    let vars = vec![local("x", Type::Int)];
    let mut expr = Expr::new(
        ExprKind::Member {
            base: Box::new(var_expr(0)),
            name: "a".to_string(),
            offset: 0,
        },
        span(),
    );
    let error = add_type(&mut expr, &vars).unwrap_err();
    assert!(error.message.contains("not a struct"));
}

#[test]
fn test_unknown_member_is_an_error() {
    let ty = Type::struct_of(vec![("a".to_string(), Type::Int)]);
    let vars = vec![local("s", ty)];
    let mut expr = Expr::new(
        ExprKind::Member {
            base: Box::new(var_expr(0)),
            name: "missing".to_string(),
            offset: 0,
        },
        span(),
    );
    let error = add_type(&mut expr, &vars).unwrap_err();
    assert!(error.message.contains("no member named 'missing'"));
}

#[test]
fn test_call_types_as_int() {
    let mut expr = Expr::new(
        ExprKind::Call {
            callee: "foo".to_string(),
            args: vec![num(1), num(2)],
        },
        span(),
    );
    add_type(&mut expr, &[]).unwrap();
    assert_eq!(expr.ty, Some(Type::Int));
}

#[test]
fn test_stmt_expr_takes_last_type() {
    let vars = vec![local("c", Type::Char)];
    let mut expr = Expr::new(
        ExprKind::StmtExpr {
            stmts: vec![Stmt::new(StmtKind::Expr(num(1)), span())],
            last: Box::new(var_expr(0)),
        },
        span(),
    );
    add_type(&mut expr, &vars).unwrap();
    assert_eq!(expr.ty, Some(Type::Char));
}

#[test]
fn test_add_type_is_idempotent() {
    let mut expr = num(1);
    expr.ty = Some(Type::Char);
    add_type(&mut expr, &[]).unwrap();
    // A pre-typed node is left untouched.
    assert_eq!(expr.ty, Some(Type::Char));
}
