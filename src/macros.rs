macro_rules! invalid_format {
    ($s:expr) => {
        $crate::types::Error::InvalidFormat($s.into())
    };
    ($fmt:expr, $($args:tt)*) => {
        $crate::types::Error::InvalidFormat(format!($fmt, $($args)*).into())
    }
}

macro_rules! unexpected_eof {
    () => {
        $crate::types::Error::UnexpectedEndOfFile(None)
    };
    ($s:expr) => {
        $crate::types::Error::UnexpectedEndOfFile(Some($s.into()))
    };
    ($fmt:expr, $($args:tt)*) => {
        $crate::types::Error::UnexpectedEndOfFile(Some(format!($fmt, $($args)*).into()))
    }
}

macro_rules! encoding_error {
    ($s:expr) => {
        $crate::types::Error::Encoding($s.into())
    };
    ($fmt:expr, $($args:tt)*) => {
        $crate::types::Error::Encoding(format!($fmt, $($args)*).into())
    }
}

macro_rules! if_eof {
    ($s:expr) => {
        |e: ::std::io::Error| if e.kind() == ::std::io::ErrorKind::UnexpectedEof {
            unexpected_eof!($s)
        } else {
            e.into()
        }
    };
    ($fmt:expr, $($args:tt)*) => {
        |e: ::std::io::Error| if e.kind() == ::std::io::ErrorKind::UnexpectedEof {
            unexpected_eof!($fmt, $($args)*)
        } else {
            e.into()
        }
    }
}

macro_rules! try_if_eof {
    ($e:expr, $s:expr) => {
        $e.map_err(if_eof!($s))?
    };
    ($e:expr, $fmt:expr, $($args:tt)*) => {
        $e.map_err(if_eof!($fmt, $($args)*))?
    }
}
