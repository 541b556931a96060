use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::expressions::{Expr, ExprKind},
    ast::statements::{FunctionDecl, Stmt, StmtKind},
    ast::types::{BaseType, Kind, Type},
    errors::errors::{Error, ErrorKind},
    lexer::tokens::{LiteralKind, Token, TokenKind, RESERVED_LOOKUP, TYPEWORD_LOOKUP},
    Span,
};

lazy_static! {
    /// The binary operators each kind of type supports. `in` is handled
    /// separately since its operands have different types, and mixed
    /// array/scalar `+` is the append rule.
    static ref BINARY_OP_TABLE: HashMap<Kind, Vec<TokenKind>> = {
        let mut map = HashMap::new();
        map.insert(
            Kind::Number,
            vec![
                TokenKind::Plus,
                TokenKind::Dash,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Equals,
                TokenKind::NotEquals,
                TokenKind::Less,
                TokenKind::LessEquals,
                TokenKind::Greater,
                TokenKind::GreaterEquals,
                TokenKind::BitOr,
                TokenKind::BitXor,
                TokenKind::BitAnd,
                TokenKind::ShiftLeft,
                TokenKind::ShiftRight,
            ],
        );
        map.insert(
            Kind::String,
            vec![TokenKind::Plus, TokenKind::Equals, TokenKind::NotEquals],
        );
        map.insert(
            Kind::Array,
            vec![
                TokenKind::Plus,
                TokenKind::Equals,
                TokenKind::NotEquals,
                TokenKind::In,
            ],
        );
        map.insert(
            Kind::Bool,
            vec![
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Equals,
                TokenKind::NotEquals,
            ],
        );
        map.insert(Kind::Struct, vec![]);
        map.insert(Kind::None, vec![]);
        map
    };
}

#[derive(Debug, Clone)]
struct Variable {
    ty: Type,
    used: bool,
    span: Span,
}

/// One lexical scope. Bindings stay in declaration order so unused
/// variable warnings come out deterministically.
#[derive(Debug, Default)]
struct Scope {
    bindings: Vec<(String, Variable)>,
}

impl Scope {
    fn get(&self, name: &str) -> Option<&Variable> {
        self.bindings
            .iter()
            .find(|(binding, _)| binding == name)
            .map(|(_, variable)| variable)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.bindings
            .iter_mut()
            .find(|(binding, _)| binding == name)
            .map(|(_, variable)| variable)
    }
}

#[derive(Debug, Clone)]
pub struct FunctionSig {
    pub params: Vec<(String, Type)>,
    pub return_type: Type,
}

/// Scanner state: the scope stack, the function table, and the warnings
/// collected so far. The bottom scope is the global scope and is never
/// popped, so globals are exempt from unused warnings.
pub struct Scanner {
    scopes: Vec<Scope>,
    functions: HashMap<String, FunctionSig>,
    warnings: Vec<Error>,
    current_function: Option<String>,
    returned_depth: Option<usize>,
}

impl Scanner {
    pub fn new() -> Self {
        Scanner {
            scopes: vec![Scope::default()],
            functions: HashMap::new(),
            warnings: Vec::new(),
            current_function: None,
            returned_depth: None,
        }
    }

    fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    fn pop_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            for (name, variable) in scope.bindings {
                if !variable.used {
                    self.warnings
                        .push(Error::warning(ErrorKind::UnusedVariable { name }, variable.span));
                }
            }
        }
    }

    fn declare(&mut self, name: &Token, ty: Type) -> Result<(), Error> {
        let span = Span::from_token(name);
        let text = name.value.as_str();

        if RESERVED_LOOKUP.contains_key(text) || TYPEWORD_LOOKUP.contains_key(text) {
            return Err(Error::new(
                ErrorKind::ReservedName {
                    name: name.value.clone(),
                },
                span,
            ));
        }
        if ty.base == BaseType::None {
            return Err(Error::new(
                ErrorKind::DeclaredNone {
                    name: name.value.clone(),
                },
                span,
            ));
        }
        if self.current_scope().get(text).is_some() {
            return Err(Error::new(
                ErrorKind::AlreadyDeclared {
                    name: name.value.clone(),
                },
                span,
            ));
        }
        if self.is_shadowing(text) {
            self.warnings.push(Error::warning(
                ErrorKind::ShadowedVariable {
                    name: name.value.clone(),
                },
                span.clone(),
            ));
        }

        self.current_scope_mut().bindings.push((
            name.value.clone(),
            Variable {
                ty,
                used: false,
                span,
            },
        ));
        Ok(())
    }

    /// Registers a top-level function: its signature in the function
    /// table and its name as a global binding, pre-marked used so a
    /// function called from nowhere does not warn.
    fn register_function(&mut self, decl: &FunctionDecl) -> Result<(), Error> {
        let name = decl.name.value.clone();
        if RESERVED_LOOKUP.contains_key(name.as_str()) || TYPEWORD_LOOKUP.contains_key(name.as_str())
        {
            return Err(Error::new(
                ErrorKind::ReservedName { name },
                Span::from_token(&decl.name),
            ));
        }
        if self.functions.contains_key(&name) {
            return Err(Error::new(
                ErrorKind::FunctionAlreadyDeclared { name },
                Span::from_token(&decl.name),
            ));
        }

        self.functions.insert(
            name.clone(),
            FunctionSig {
                params: decl
                    .params
                    .iter()
                    .map(|param| (param.name.value.clone(), param.ty.clone()))
                    .collect(),
                return_type: decl.return_type.clone().unwrap_or_else(Type::none),
            },
        );
        self.scopes[0].bindings.push((
            name,
            Variable {
                ty: Type::new(BaseType::Function),
                used: true,
                span: Span::from_token(&decl.name),
            },
        ));
        Ok(())
    }

    fn assign(&mut self, name: &Token, value_type: &Type, value_span: &Span) -> Result<(), Error> {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(variable) = scope.get_mut(&name.value) {
                if variable.ty != *value_type {
                    return Err(Error::new(
                        ErrorKind::TypeMismatch {
                            expected: variable.ty.to_string(),
                            found: value_type.to_string(),
                        },
                        value_span.clone(),
                    ));
                }
                // Assigning a concrete array into an `[]` refines the
                // stored type.
                if let Some(unified) = variable.ty.unify(value_type) {
                    variable.ty = unified;
                }
                return Ok(());
            }
        }
        Err(Error::new(
            ErrorKind::AssignUndeclared {
                name: name.value.clone(),
            },
            Span::from_token(name),
        ))
    }

    fn get_var(&mut self, name: &Token) -> Result<Type, Error> {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(variable) = scope.get_mut(&name.value) {
                variable.used = true;
                return Ok(variable.ty.clone());
            }
        }
        Err(Error::new(
            ErrorKind::Undefined {
                name: name.value.clone(),
            },
            Span::from_token(name),
        ))
    }

    // The global scope is never popped, so the stack is never empty.
    fn current_scope(&self) -> &Scope {
        &self.scopes[self.scopes.len() - 1]
    }

    fn current_scope_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    fn is_shadowing(&self, name: &str) -> bool {
        self.scopes[..self.scopes.len() - 1]
            .iter()
            .any(|scope| scope.get(name).is_some())
    }

    fn note_return(&mut self) {
        let depth = self.scopes.len();
        self.returned_depth = Some(match self.returned_depth {
            Some(existing) => existing.min(depth),
            None => depth,
        });
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Scanner::new()
    }
}

/// Checks a parsed program. Returns the collected warnings plus the
/// first fatal error, if any; inferred declaration types are written
/// back into the statements as a side effect.
pub fn scan(statements: &mut [Stmt]) -> (Vec<Error>, Option<Error>) {
    let mut scanner = Scanner::new();

    for stmt in statements.iter() {
        if let StmtKind::Function(decl) = &stmt.kind {
            if let Err(error) = scanner.register_function(decl) {
                return (scanner.warnings, Some(error));
            }
        }
    }

    for stmt in statements.iter_mut() {
        if matches!(stmt.kind, StmtKind::Function(_)) {
            continue;
        }
        if let Err(error) = scan_stmt(&mut scanner, stmt) {
            return (scanner.warnings, Some(error));
        }
    }

    for stmt in statements.iter_mut() {
        if matches!(stmt.kind, StmtKind::Function(_)) {
            if let Err(error) = scan_function_stmt(&mut scanner, stmt) {
                return (scanner.warnings, Some(error));
            }
        }
    }

    (scanner.warnings, None)
}

fn scan_stmt(scanner: &mut Scanner, stmt: &mut Stmt) -> Result<(), Error> {
    let stmt_span = stmt.span.clone();
    match &mut stmt.kind {
        StmtKind::Expression(expr) => {
            eval_expr(scanner, expr)?;
            Ok(())
        }
        StmtKind::Declaration {
            name,
            declared_type,
            value,
        } => {
            let value_type = eval_expr(scanner, value)?;
            let ty = match declared_type {
                Some(declared) => {
                    if *declared != value_type {
                        return Err(Error::new(
                            ErrorKind::TypeMismatch {
                                expected: declared.to_string(),
                                found: value_type.to_string(),
                            },
                            value.span.clone(),
                        ));
                    }
                    declared.unify(&value_type).unwrap_or_else(|| declared.clone())
                }
                None => value_type,
            };
            scanner.declare(name, ty.clone())?;
            *declared_type = Some(ty);
            Ok(())
        }
        StmtKind::Assignment { target, value } => {
            let value_type = eval_expr(scanner, value)?;
            match &target.kind {
                ExprKind::Variable(name) => scanner.assign(name, &value_type, &value.span),
                _ => Err(Error::new(
                    ErrorKind::InvalidAssignmentTarget,
                    target.span.clone(),
                )),
            }
        }
        StmtKind::Return(value) => {
            let function = match &scanner.current_function {
                Some(function) => function.clone(),
                None => {
                    return Err(Error::new(ErrorKind::ReturnOutsideFunction, stmt_span))
                }
            };
            let value_type = eval_expr(scanner, value)?;
            if let Some(sig) = scanner.functions.get(&function) {
                if sig.return_type != value_type {
                    return Err(Error::new(
                        ErrorKind::TypeMismatch {
                            expected: sig.return_type.to_string(),
                            found: value_type.to_string(),
                        },
                        if value.is_empty() {
                            stmt_span
                        } else {
                            value.span.clone()
                        },
                    ));
                }
            }
            scanner.note_return();
            Ok(())
        }
        StmtKind::Block(body) => {
            scanner.push_scope();
            for stmt in body {
                scan_stmt(scanner, stmt)?;
            }
            scanner.pop_scope();
            Ok(())
        }
        StmtKind::Function(_) => Err(Error::new(ErrorKind::NestedFunction, stmt_span)),
    }
}

/// Checks a function body in its own scope. A function with a declared
/// return type must return on its top level; a return inside a nested
/// block does not count, since nothing guarantees the block runs through
/// to it.
fn scan_function_stmt(scanner: &mut Scanner, stmt: &mut Stmt) -> Result<(), Error> {
    let span = stmt.span.clone();
    let decl = match &mut stmt.kind {
        StmtKind::Function(decl) => decl,
        _ => return Ok(()),
    };

    scanner.push_scope();
    for param in &decl.params {
        scanner.declare(&param.name, param.ty.clone())?;
    }
    scanner.current_function = Some(decl.name.value.clone());
    scanner.returned_depth = None;
    let base_depth = scanner.scopes.len();

    for stmt in &mut decl.body {
        scan_stmt(scanner, stmt)?;
    }

    if decl.return_type.is_some() && scanner.returned_depth != Some(base_depth) {
        return Err(Error::new(
            ErrorKind::MissingReturn {
                name: decl.name.value.clone(),
            },
            span,
        ));
    }

    scanner.current_function = None;
    scanner.pop_scope();
    Ok(())
}

fn literal_type(token: &Token) -> Type {
    match token.literal {
        LiteralKind::Number => {
            if token.is_float {
                Type::new(BaseType::Float)
            } else {
                Type::int()
            }
        }
        LiteralKind::String => Type::new(BaseType::String),
        LiteralKind::Char => Type::new(BaseType::Char),
        LiteralKind::Bool => Type::bool(),
        LiteralKind::None => Type::none(),
    }
}

/// Determines the type of an expression, checking it along the way.
pub fn eval_expr(scanner: &mut Scanner, expr: &Expr) -> Result<Type, Error> {
    match &expr.kind {
        ExprKind::Empty => Ok(Type::none()),
        ExprKind::Literal(token) => Ok(literal_type(token)),
        ExprKind::Variable(token) => scanner.get_var(token),
        ExprKind::Group(inner) => eval_expr(scanner, inner),
        ExprKind::Unary { operator, operand } => {
            let ty = eval_expr(scanner, operand)?;
            if ty.base == BaseType::Any {
                return Ok(ty);
            }
            match operator.kind {
                TokenKind::Dash | TokenKind::Tilde if ty.kind == Kind::Number => Ok(ty),
                TokenKind::Not if ty.kind == Kind::Bool => Ok(Type::bool()),
                _ => Err(Error::new(
                    ErrorKind::InvalidOperator {
                        operator: operator.value.clone(),
                        type_name: ty.to_string(),
                    },
                    expr.span.clone(),
                )),
            }
        }
        ExprKind::Binary {
            operator,
            left,
            right,
        } => check_binary(scanner, operator, left, right, &expr.span),
        ExprKind::Array(body) => match &body.kind {
            ExprKind::Empty => Ok(Type::empty_array()),
            ExprKind::Args(parts) => {
                let first = eval_expr(scanner, &parts[0])?;
                for (index, part) in parts.iter().enumerate().skip(1) {
                    let ty = eval_expr(scanner, part)?;
                    if ty != first {
                        return Err(Error::new(
                            ErrorKind::ArrayElementMismatch {
                                index,
                                expected: first.to_string(),
                                found: ty.to_string(),
                            },
                            part.span.clone(),
                        ));
                    }
                }
                Ok(Type::array(first))
            }
            _ => Ok(Type::array(eval_expr(scanner, body)?)),
        },
        ExprKind::Args(_) => Err(Error::new(ErrorKind::UnexpectedArgs, expr.span.clone())),
        ExprKind::Call { callee, args } => check_call(scanner, callee, args, &expr.span),
        ExprKind::Index { array, index } => {
            let array_type = eval_expr(scanner, array)?;
            if !array_type.is_array() && array_type.base != BaseType::Any {
                return Err(Error::new(
                    ErrorKind::NotAnArray {
                        type_name: array_type.to_string(),
                    },
                    array.span.clone(),
                ));
            }
            let index_type = eval_expr(scanner, index)?;
            if !index_type.is_unsigned_like() && index_type.base != BaseType::Any {
                return Err(Error::new(
                    ErrorKind::InvalidIndexType {
                        found: index_type.to_string(),
                    },
                    index.span.clone(),
                ));
            }
            Ok(array_type.element_type())
        }
    }
}

fn check_call(
    scanner: &mut Scanner,
    callee: &Expr,
    args: &Expr,
    span: &Span,
) -> Result<Type, Error> {
    let name = match &callee.kind {
        ExprKind::Variable(token) => token,
        _ => return Err(Error::new(ErrorKind::InvalidCallee, callee.span.clone())),
    };
    let sig = match scanner.functions.get(&name.value) {
        Some(sig) => sig.clone(),
        None => {
            if scanner.get_var(name).is_ok() {
                return Err(Error::new(
                    ErrorKind::NotAFunction {
                        name: name.value.clone(),
                    },
                    callee.span.clone(),
                ));
            }
            return Err(Error::new(
                ErrorKind::Undefined {
                    name: name.value.clone(),
                },
                callee.span.clone(),
            ));
        }
    };

    let arg_exprs: Vec<&Expr> = match &args.kind {
        ExprKind::Empty => Vec::new(),
        ExprKind::Args(parts) => parts.iter().collect(),
        _ => vec![args],
    };

    if arg_exprs.len() != sig.params.len() {
        return Err(Error::new(
            ErrorKind::ArityMismatch {
                name: name.value.clone(),
                expected: sig.params.len(),
                found: arg_exprs.len(),
            },
            span.clone(),
        ));
    }

    for (index, (arg, (param_name, param_type))) in
        arg_exprs.iter().zip(&sig.params).enumerate()
    {
        let ty = eval_expr(scanner, arg)?;
        if ty != *param_type {
            return Err(Error::new(
                ErrorKind::ArgumentTypeMismatch {
                    index: index + 1,
                    name: param_name.clone(),
                    expected: param_type.to_string(),
                    found: ty.to_string(),
                },
                arg.span.clone(),
            ));
        }
    }

    Ok(sig.return_type.clone())
}

fn check_binary(
    scanner: &mut Scanner,
    operator: &Token,
    left: &Expr,
    right: &Expr,
    span: &Span,
) -> Result<Type, Error> {
    let left_type = eval_expr(scanner, left)?;
    let right_type = eval_expr(scanner, right)?;

    // `in` probes membership: the right side must be an array whose
    // element type matches the left side.
    if operator.kind == TokenKind::In {
        if !right_type.is_array() && right_type.base != BaseType::Any {
            return Err(Error::new(
                ErrorKind::NotAnArray {
                    type_name: right_type.to_string(),
                },
                right.span.clone(),
            ));
        }
        if left_type != right_type.element_type() {
            return Err(Error::new(
                ErrorKind::OperandMismatch {
                    left: left_type.to_string(),
                    right: right_type.to_string(),
                },
                span.clone(),
            ));
        }
        return Ok(Type::bool());
    }

    if left_type.base == BaseType::Any {
        return Ok(right_type);
    }
    if right_type.base == BaseType::Any {
        return Ok(left_type);
    }

    for operand in [&left_type, &right_type] {
        let allowed = BINARY_OP_TABLE
            .get(&operand.kind)
            .map(|ops| ops.contains(&operator.kind))
            .unwrap_or(false);
        if !allowed {
            return Err(Error::new(
                ErrorKind::InvalidOperator {
                    operator: operator.value.clone(),
                    type_name: operand.to_string(),
                },
                span.clone(),
            ));
        }
    }

    // Mixed array/scalar only makes sense as append.
    if left_type.is_array() != right_type.is_array() {
        if operator.kind != TokenKind::Plus {
            return Err(Error::new(
                ErrorKind::OperandMismatch {
                    left: left_type.to_string(),
                    right: right_type.to_string(),
                },
                span.clone(),
            ));
        }
        let (array, element) = if left_type.is_array() {
            (&left_type, &right_type)
        } else {
            (&right_type, &left_type)
        };
        return match array.unify(element) {
            Some(ty) => Ok(ty),
            None => Err(Error::new(
                ErrorKind::ArrayAppendMismatch {
                    expected: array.element_type().to_string(),
                    found: element.to_string(),
                },
                span.clone(),
            )),
        };
    }

    if matches!(
        operator.kind,
        TokenKind::BitOr
            | TokenKind::BitXor
            | TokenKind::BitAnd
            | TokenKind::ShiftLeft
            | TokenKind::ShiftRight
    ) {
        let offender = if !left_type.is_unsigned_like() {
            &left_type
        } else if !right_type.is_unsigned_like() {
            &right_type
        } else {
            let unified = left_type
                .unify(&right_type)
                .unwrap_or_else(|| left_type.clone());
            return Ok(unified);
        };
        return Err(Error::new(
            ErrorKind::InvalidOperator {
                operator: operator.value.clone(),
                type_name: offender.to_string(),
            },
            span.clone(),
        ));
    }

    if operator.kind == TokenKind::Percent && !right_type.is_unsigned_like() {
        return Err(Error::new(
            ErrorKind::InvalidOperator {
                operator: operator.value.clone(),
                type_name: right_type.to_string(),
            },
            span.clone(),
        ));
    }

    let unified = match left_type.unify(&right_type) {
        Some(ty) => ty,
        None => {
            return Err(Error::new(
                ErrorKind::OperandMismatch {
                    left: left_type.to_string(),
                    right: right_type.to_string(),
                },
                span.clone(),
            ))
        }
    };

    if operator.kind == TokenKind::Percent {
        return Ok(Type::int());
    }
    Ok(unified)
}
